use serde::{Deserialize, Serialize};

/// 难度级别枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 简单：基础记忆、定义、简单概念
    Easy,
    /// 中等：概念应用、分析、中等复杂度
    Medium,
    /// 困难：综合、评价、复杂推理
    Hard,
}

impl Difficulty {
    /// 获取标准名称（小写，与命令行参数一致）
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// 尝试从字符串解析难度（精确匹配）
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 正确答案标签枚举
///
/// MCQ 固定为四个选项，正确答案只能是 A、B、C、D 之一
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerKey {
    A,
    B,
    C,
    D,
}

impl AnswerKey {
    /// 允许的答案标签集合（按顺序）
    pub const ALL: [AnswerKey; 4] = [AnswerKey::A, AnswerKey::B, AnswerKey::C, AnswerKey::D];

    pub fn as_str(self) -> &'static str {
        match self {
            AnswerKey::A => "A",
            AnswerKey::B => "B",
            AnswerKey::C => "C",
            AnswerKey::D => "D",
        }
    }

    /// 获取选项标签前缀，如 "A)"
    pub fn label(self) -> &'static str {
        match self {
            AnswerKey::A => "A)",
            AnswerKey::B => "B)",
            AnswerKey::C => "C)",
            AnswerKey::D => "D)",
        }
    }

    /// 尝试从字符串解析答案标签
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "A" => Some(AnswerKey::A),
            "B" => Some(AnswerKey::B),
            "C" => Some(AnswerKey::C),
            "D" => Some(AnswerKey::D),
            _ => None,
        }
    }
}

impl std::fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 单个多选题
///
/// 字段名即为下游渲染方消费的 JSON 契约：
/// `question` / `options` / `correct_answer` / `explanation`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mcq {
    /// 题干（至少 10 个字符）
    pub question: String,
    /// 恰好 4 个选项，按 A)/B)/C)/D) 标签排序
    pub options: Vec<String>,
    /// 正确答案标签
    pub correct_answer: AnswerKey,
    /// 解析说明（至少 10 个字符）
    pub explanation: String,
}

/// 生成请求
///
/// 每次调用创建一个，用完即弃，不跨请求持久化
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// 提取出的源文本（已通过文本门校验）
    pub source_text: String,
    /// 难度级别
    pub difficulty: Difficulty,
    /// 目标题目数量，范围 [1, 20]
    pub num_questions: u32,
}

/// 输入门校验通过后的工作流参数
///
/// 此时源文本尚未读取，只携带命令行层面的三元组
#[derive(Debug, Clone)]
pub struct WorkflowParams {
    /// 原始文件名（用于日志展示）
    pub filename: String,
    pub difficulty: Difficulty,
    pub num_questions: u32,
}
