//! 业务能力层
//!
//! 每个服务只描述"我能做什么"，不关心流程顺序：
//! - `prompt` - 提示词构建能力
//! - `parser` - 容错响应解析能力
//! - `validator` - 结构校验与输入/文本门能力
//! - `fallback` - 兜底 MCQ 合成能力

pub mod fallback;
pub mod parser;
pub mod prompt;
pub mod validator;
