//! 流程层
//!
//! 定义"一次生成请求"的完整处理流程

pub mod generation_flow;

pub use generation_flow::{GenerationFlow, GenerationOutcome};
