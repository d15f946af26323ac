//! 结构校验 - 业务能力层
//!
//! 三个粒度的校验，全部是无状态自由函数：
//! - 单题结构校验：返回该题的错误列表（空列表 ⇒ 结构有效）
//! - 集合级校验：聚合统计与警告
//! - 两道门：输入门（命令行三元组）与文本门（提取文本长度）
//!
//! 预期中的校验结果用报告/列表表达；Err 只用于必须中止流程的输入门。

use serde_json::Value;

use crate::error::{AppError, InputError, Result, TextError};
use crate::models::{
    AnswerKey, Difficulty, TextReport, TextStats, ValidationReport, WorkflowParams,
};

/// 题干与解析说明的最小长度（去除首尾空白后）
const MIN_FIELD_LEN: usize = 10;

/// 单个选项的最小长度（去除首尾空白后）
const MIN_OPTION_LEN: usize = 3;

/// 源文本长度下限
pub const MIN_TEXT_LENGTH: usize = 100;

/// 源文本长度上限
pub const MAX_TEXT_LENGTH: usize = 100_000;

/// 低于此长度提示"文本偏短"警告
const SHORT_TEXT_WARNING: usize = 500;

/// 超过此长度提示"文本很长"警告
const LONG_TEXT_WARNING: usize = 50_000;

/// 题目数量允许范围
const MIN_QUESTIONS: i64 = 1;
const MAX_QUESTIONS: i64 = 20;

/// 校验单个 MCQ 记录的结构
///
/// 返回该记录的错误列表；任何必填字段缺失时直接返回，
/// 不再做后续字段检查
pub fn validate_mcq_structure(mcq: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    let obj = match mcq.as_object() {
        Some(obj) => obj,
        None => {
            errors.push("MCQ 必须是 JSON 对象".to_string());
            return errors;
        }
    };

    // 必填字段
    for field in ["question", "options", "correct_answer", "explanation"] {
        if !obj.contains_key(field) {
            errors.push(format!("缺少必填字段: {}", field));
        }
    }
    if !errors.is_empty() {
        return errors;
    }

    // question
    match obj.get("question").and_then(|v| v.as_str()) {
        Some(q) if q.trim().chars().count() >= MIN_FIELD_LEN => {}
        _ => errors.push(format!(
            "question 必须是至少 {} 个字符的非空字符串",
            MIN_FIELD_LEN
        )),
    }

    // options
    match obj.get("options").and_then(|v| v.as_array()) {
        Some(options) if options.len() == 4 => {
            for (i, option) in options.iter().enumerate() {
                let label = AnswerKey::ALL[i].label();
                match option.as_str() {
                    Some(text) => {
                        if text.trim().chars().count() < MIN_OPTION_LEN {
                            errors.push(format!(
                                "选项 {} 必须是至少 {} 个字符的非空字符串",
                                i + 1,
                                MIN_OPTION_LEN
                            ));
                        } else if !text.trim_start().starts_with(label) {
                            errors.push(format!("选项 {} 必须以标签 {} 开头", i + 1, label));
                        }
                    }
                    None => errors.push(format!(
                        "选项 {} 必须是至少 {} 个字符的非空字符串",
                        i + 1,
                        MIN_OPTION_LEN
                    )),
                }
            }
        }
        Some(options) => errors.push(format!(
            "options 必须是恰好 4 个选项的数组, 实际: {} 个",
            options.len()
        )),
        None => errors.push("options 必须是恰好 4 个选项的数组".to_string()),
    }

    // correct_answer
    let answer_valid = obj
        .get("correct_answer")
        .and_then(|v| v.as_str())
        .and_then(AnswerKey::from_str)
        .is_some();
    if !answer_valid {
        errors.push(format!(
            "correct_answer 必须是 [A, B, C, D] 之一, 实际: {}",
            obj.get("correct_answer").cloned().unwrap_or(Value::Null)
        ));
    }

    // explanation
    match obj.get("explanation").and_then(|v| v.as_str()) {
        Some(e) if e.trim().chars().count() >= MIN_FIELD_LEN => {}
        _ => errors.push(format!(
            "explanation 必须是至少 {} 个字符的非空字符串",
            MIN_FIELD_LEN
        )),
    }

    errors
}

/// 校验 MCQ 记录集合
///
/// 空集合无条件无效（单条解释性错误，不做逐题检查）。
/// 通过率低于 80% 只产生警告，不会独立翻转 valid。
pub fn validate_mcq_list(mcqs: &[Value]) -> ValidationReport {
    let mut report = ValidationReport::new();
    report.stats.total_questions = mcqs.len();

    if mcqs.is_empty() {
        report.valid = false;
        report.errors.push("没有提供任何 MCQ".to_string());
        return report;
    }

    for (i, mcq) in mcqs.iter().enumerate() {
        let errors = validate_mcq_structure(mcq);
        if errors.is_empty() {
            report.stats.valid_questions += 1;
        } else {
            report.stats.invalid_questions += 1;
            for error in errors {
                report.errors.push(format!("题目 {}: {}", i + 1, error));
            }
        }
    }

    if report.stats.invalid_questions > 0 {
        report.valid = false;
    }

    if (report.stats.valid_questions as f64) < (mcqs.len() as f64) * 0.8 {
        report
            .warnings
            .push("超过 20% 的题目未通过结构校验".to_string());
    }

    report
}

/// 输入门：校验命令行三元组
///
/// 在任何后端调用之前执行；失败即致命
pub fn validate_workflow_inputs(
    filename: &str,
    difficulty: &str,
    num_questions: &str,
) -> Result<WorkflowParams> {
    if filename.trim().is_empty() {
        return Err(AppError::Input(InputError::EmptyFilename));
    }

    let difficulty = Difficulty::from_str(difficulty).ok_or_else(|| {
        AppError::Input(InputError::InvalidDifficulty {
            given: difficulty.to_string(),
        })
    })?;

    let count: i64 = num_questions.trim().parse().map_err(|_| {
        AppError::Input(InputError::InvalidQuestionCount {
            given: num_questions.to_string(),
        })
    })?;

    if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&count) {
        return Err(AppError::Input(InputError::QuestionCountOutOfRange {
            count,
        }));
    }

    Ok(WorkflowParams {
        filename: filename.to_string(),
        difficulty,
        num_questions: count as u32,
    })
}

/// 文本门：校验提取出的源文本
///
/// 在 PromptBuilder 之前执行；长度越界为错误，偏短/很长为警告
pub fn validate_source_text(text: &str) -> TextReport {
    let trimmed = text.trim();
    let length = trimmed.chars().count();

    let stats = TextStats {
        length,
        word_count: trimmed.split_whitespace().count(),
        line_count: trimmed.lines().count(),
    };

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if length < MIN_TEXT_LENGTH {
        errors.push(format!(
            "文本过短: {} 个字符, 最少需要 {} 个",
            length, MIN_TEXT_LENGTH
        ));
    }
    if length > MAX_TEXT_LENGTH {
        errors.push(format!(
            "文本过长: {} 个字符, 最多允许 {} 个",
            length, MAX_TEXT_LENGTH
        ));
    }

    if length < SHORT_TEXT_WARNING {
        warnings.push("文本偏短, 可能影响生成题目的数量和质量".to_string());
    }
    if length > LONG_TEXT_WARNING {
        warnings.push("文本很长, 建议拆分为多个部分处理".to_string());
    }

    TextReport {
        valid: errors.is_empty(),
        errors,
        warnings,
        stats,
    }
}

/// 文本门的强制版本：报告无效时转为致命的 TextError
pub fn enforce_source_text(text: &str) -> Result<TextReport> {
    let report = validate_source_text(text);
    if report.valid {
        return Ok(report);
    }

    let length = report.stats.length;
    if length < MIN_TEXT_LENGTH {
        Err(AppError::Text(TextError::TooShort {
            length,
            min: MIN_TEXT_LENGTH,
        }))
    } else {
        Err(AppError::Text(TextError::TooLong {
            length,
            max: MAX_TEXT_LENGTH,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_mcq() -> Value {
        json!({
            "question": "What is the capital of France?",
            "options": ["A) London", "B) Berlin", "C) Paris", "D) Madrid"],
            "correct_answer": "C",
            "explanation": "Paris is the capital and largest city of France."
        })
    }

    #[test]
    fn test_valid_mcq_has_no_errors() {
        assert!(validate_mcq_structure(&valid_mcq()).is_empty());
    }

    #[test]
    fn test_missing_field_short_circuits() {
        let mut mcq = valid_mcq();
        mcq.as_object_mut().unwrap().remove("options");
        // 顺便破坏另一个字段，确认缺字段时不做后续检查
        mcq["question"] = json!("short");

        let errors = validate_mcq_structure(&mcq);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("options"));
        assert!(errors[0].contains("缺少必填字段"));
    }

    #[test]
    fn test_three_options_rejected_naming_count() {
        let mut mcq = valid_mcq();
        mcq["options"] = json!(["A) One", "B) Two", "C) Three"]);
        let errors = validate_mcq_structure(&mcq);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("4"));
    }

    #[test]
    fn test_five_options_rejected_naming_count() {
        let mut mcq = valid_mcq();
        mcq["options"] = json!(["A) 1st", "B) 2nd", "C) 3rd", "D) 4th", "E) 5th"]);
        let errors = validate_mcq_structure(&mcq);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("4"));
    }

    #[test]
    fn test_correct_answer_e_rejected_naming_allowed_set() {
        let mut mcq = valid_mcq();
        mcq["correct_answer"] = json!("E");
        let errors = validate_mcq_structure(&mcq);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("A, B, C, D"));
    }

    #[test]
    fn test_short_question_rejected() {
        let mut mcq = valid_mcq();
        mcq["question"] = json!("Why?");
        let errors = validate_mcq_structure(&mcq);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("question"));
    }

    #[test]
    fn test_short_option_rejected() {
        let mut mcq = valid_mcq();
        mcq["options"] = json!(["A) London", "B)", "C) Paris", "D) Madrid"]);
        let errors = validate_mcq_structure(&mcq);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("选项 2"));
    }

    #[test]
    fn test_mislabeled_option_rejected() {
        let mut mcq = valid_mcq();
        mcq["options"] = json!(["A) London", "Berlin city", "C) Paris", "D) Madrid"]);
        let errors = validate_mcq_structure(&mcq);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("B)"));
    }

    #[test]
    fn test_fully_valid_list_of_four() {
        let mcqs = vec![valid_mcq(), valid_mcq(), valid_mcq(), valid_mcq()];
        let report = validate_mcq_list(&mcqs);
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert_eq!(report.stats.valid_questions, 4);
        assert_eq!(report.stats.invalid_questions, 0);
    }

    #[test]
    fn test_empty_list_is_invalid() {
        let report = validate_mcq_list(&[]);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.stats.total_questions, 0);
    }

    #[test]
    fn test_errors_tagged_with_item_index() {
        let mut bad = valid_mcq();
        bad["correct_answer"] = json!("E");
        let mcqs = vec![valid_mcq(), bad];

        let report = validate_mcq_list(&mcqs);
        assert!(!report.valid);
        assert!(report.errors[0].starts_with("题目 2:"));
        assert_eq!(report.stats.valid_questions, 1);
        assert_eq!(report.stats.invalid_questions, 1);
    }

    #[test]
    fn test_warning_below_eighty_percent() {
        let mut bad = valid_mcq();
        bad["correct_answer"] = json!("E");
        // 3/4 = 75% < 80% → 警告，但警告不等于额外的错误
        let mcqs = vec![valid_mcq(), valid_mcq(), valid_mcq(), bad];

        let report = validate_mcq_list(&mcqs);
        assert!(!report.valid);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_no_warning_at_or_above_eighty_percent() {
        let mut bad = valid_mcq();
        bad["correct_answer"] = json!("E");
        // 4/5 = 80%，不触发警告
        let mcqs = vec![valid_mcq(), valid_mcq(), valid_mcq(), valid_mcq(), bad];

        let report = validate_mcq_list(&mcqs);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_input_gate_accepts_valid_triple() {
        let params = validate_workflow_inputs("lecture.pdf", "medium", "10").unwrap();
        assert_eq!(params.filename, "lecture.pdf");
        assert_eq!(params.difficulty, Difficulty::Medium);
        assert_eq!(params.num_questions, 10);
    }

    #[test]
    fn test_input_gate_rejects_count_25() {
        let result = validate_workflow_inputs("lecture.pdf", "easy", "25");
        match result {
            Err(AppError::Input(InputError::QuestionCountOutOfRange { count })) => {
                assert_eq!(count, 25);
            }
            other => panic!("预期数量越界错误, 实际: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_input_gate_rejects_unparseable_count() {
        assert!(matches!(
            validate_workflow_inputs("lecture.pdf", "easy", "ten"),
            Err(AppError::Input(InputError::InvalidQuestionCount { .. }))
        ));
    }

    #[test]
    fn test_input_gate_rejects_bad_difficulty() {
        assert!(matches!(
            validate_workflow_inputs("lecture.pdf", "extreme", "5"),
            Err(AppError::Input(InputError::InvalidDifficulty { .. }))
        ));
    }

    #[test]
    fn test_input_gate_rejects_empty_filename() {
        assert!(matches!(
            validate_workflow_inputs("  ", "easy", "5"),
            Err(AppError::Input(InputError::EmptyFilename))
        ));
    }

    #[test]
    fn test_text_gate_rejects_fifty_chars() {
        let text = "a".repeat(50);
        let report = validate_source_text(&text);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);

        assert!(matches!(
            enforce_source_text(&text),
            Err(AppError::Text(TextError::TooShort { length: 50, .. }))
        ));
    }

    #[test]
    fn test_text_gate_accepts_exactly_max_length() {
        let text = "b".repeat(MAX_TEXT_LENGTH);
        let report = validate_source_text(&text);
        assert!(report.valid);
        assert!(report.errors.is_empty());
        // 超过 50,000 的警告仍然存在
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_text_gate_rejects_over_max_length() {
        let text = "c".repeat(MAX_TEXT_LENGTH + 1);
        assert!(matches!(
            enforce_source_text(&text),
            Err(AppError::Text(TextError::TooLong { .. }))
        ));
    }

    #[test]
    fn test_text_gate_short_warning() {
        let text = "d".repeat(300);
        let report = validate_source_text(&text);
        assert!(report.valid);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_text_stats() {
        let report = validate_source_text("one two three\nfour five");
        assert_eq!(report.stats.word_count, 5);
        assert_eq!(report.stats.line_count, 2);
    }
}
