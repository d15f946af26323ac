//! 数据模型层
//!
//! 定义 MCQ、难度、生成请求以及校验报告等核心数据结构

pub mod mcq;
pub mod report;

pub use mcq::{AnswerKey, Difficulty, GenerationRequest, Mcq, WorkflowParams};
pub use report::{TextReport, TextStats, ValidationReport, ValidationStats};
