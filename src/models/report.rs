//! 校验报告数据结构
//!
//! 结构校验的预期结果用显式报告表达，不用错误类型（错误保留给不可恢复的失败）

use serde::Serialize;

/// MCQ 集合的校验统计
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationStats {
    pub total_questions: usize,
    pub valid_questions: usize,
    pub invalid_questions: usize,
}

/// MCQ 集合的校验报告
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// 所有题目均通过结构校验时为 true
    pub valid: bool,
    /// 错误列表，每条带有来源题目的序号（从 1 开始）
    pub errors: Vec<String>,
    /// 警告列表（警告不会使 valid 变为 false）
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
}

impl ValidationReport {
    /// 创建一个初始为"有效"的空报告
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// 源文本统计
#[derive(Debug, Clone, Default, Serialize)]
pub struct TextStats {
    /// 字符数（按 Unicode 字符计）
    pub length: usize,
    pub word_count: usize,
    pub line_count: usize,
}

/// 源文本门的校验报告
#[derive(Debug, Clone, Serialize)]
pub struct TextReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: TextStats,
}
