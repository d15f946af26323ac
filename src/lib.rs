//! # MCQ Generator
//!
//! 从提取出的文档文本生成并校验多选题（MCQ）的流水线
//!
//! ## 架构设计
//!
//! 本系统采用严格的分层架构：
//!
//! ### ① 后端客户端层（Clients）
//! - `clients/` - 封装两种文本生成后端的 HTTP 调用
//! - `OllamaClient` - 补全服务（可配置地址，超时 300s）
//! - `HuggingFaceClient` - 托管推理服务（固定端点，超时 120s）
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程顺序
//! - `prompt` - 提示词构建（纯函数，含受限后端的截断）
//! - `parser` - 容错响应解析（围栏剥离 / 括号定位 / JSON 解码）
//! - `validator` - 结构校验 + 输入门 + 文本门
//! - `fallback` - 兜底 MCQ 合成（保证流水线终止）
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次生成请求"的完整处理流程
//! - `GenerationFlow` - 提示词 → 后端 → 解析 → 兜底 的编排
//!
//! ### ④ 编排层（Orchestration）
//! - `app.rs` - 命令行参数、两道门、落盘与统计
//!
//! ## 失败策略
//!
//! 按后端区分（既有设计，刻意保留为显式策略）：补全服务路径上
//! 后端/解析失败直接致命；托管推理路径上转入兜底合成。

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::{App, CliArgs};
pub use clients::{BackendClient, BackendKind, HuggingFaceClient, OllamaClient};
pub use config::Config;
pub use error::{AppError, Result};
pub use models::{AnswerKey, Difficulty, GenerationRequest, Mcq, ValidationReport};
pub use workflow::{GenerationFlow, GenerationOutcome};
