//! 响应解析 - 业务能力层
//!
//! 从后端返回的原始文本中提取 JSON 数组。实际观察到三种畸形：
//! (a) JSON 块被代码围栏包裹
//! (b) JSON 数组前后夹杂解释性文字
//! (c) 本身就是合法 JSON
//!
//! 这里只做结构提取，不做语义校验（语义校验属于 validator）

use serde_json::Value;
use tracing::debug;

use crate::error::{AppError, ParseError, Result};
use crate::utils::logging::truncate_text;

/// 错误诊断保留的原始响应字符数
const SNIPPET_LEN: usize = 500;

/// 从原始响应文本中提取 MCQ 记录数组
///
/// 先剥离代码围栏，再做括号定位；两种畸形可以同时出现
/// （如 解释性文字 + 围栏包裹的数组），所以两步总是依次执行。
/// 解码结果必须是 JSON 数组；其他形状一律视为结构错误。
/// 解码失败时错误携带原始响应的前 500 个字符用于诊断。
pub fn extract_mcq_records(raw: &str) -> Result<Vec<Value>> {
    let response = raw.trim();

    let candidate = extract_bracketed(strip_code_fence(response));

    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| AppError::json_decode_failed(truncate_text(response, SNIPPET_LEN), e))?;

    match value {
        Value::Array(records) => {
            debug!("成功解析 {} 条 MCQ 记录", records.len());
            Ok(records)
        }
        other => Err(AppError::Parse(ParseError::NotAnArray {
            found: json_type_name(&other).to_string(),
        })),
    }
}

/// 剥离字面的代码围栏标记
///
/// 前导 "```json" 或 "```" 与尾部 "```" 各自独立剥离
fn strip_code_fence(text: &str) -> &str {
    let mut s = text;

    if let Some(rest) = s.strip_prefix("```json") {
        s = rest;
    } else if let Some(rest) = s.strip_prefix("```") {
        s = rest;
    }

    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }

    s.trim()
}

/// 取首个 '[' 到末个 ']' 的子串作为候选 JSON
///
/// 两个括号缺一个（或顺序颠倒）时原样返回，交给 JSON 解码报错
fn extract_bracketed(text: &str) -> &str {
    match (text.find('['), text.rfind(']')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_ARRAY: &str = r#"[
  {
    "question": "What is the main purpose of photosynthesis?",
    "options": ["A) Oxygen", "B) Energy", "C) CO2", "D) Water"],
    "correct_answer": "B",
    "explanation": "It converts light energy into chemical energy."
  },
  {
    "question": "Which organelle hosts photosynthesis?",
    "options": ["A) Chloroplast", "B) Nucleus", "C) Ribosome", "D) Vacuole"],
    "correct_answer": "A",
    "explanation": "Chloroplasts contain the chlorophyll pigments."
  }
]"#;

    #[test]
    fn test_plain_json_array() {
        let records = extract_mcq_records(VALID_ARRAY).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].get("correct_answer").unwrap().as_str().unwrap(),
            "B"
        );
    }

    /// 围栏包裹的响应与未包裹的响应解析结果完全一致
    #[test]
    fn test_fenced_parses_same_as_unfenced() {
        let fenced = format!("```json\n{}\n```", VALID_ARRAY);
        assert_eq!(
            extract_mcq_records(&fenced).unwrap(),
            extract_mcq_records(VALID_ARRAY).unwrap()
        );
    }

    #[test]
    fn test_bare_fence_opener() {
        let fenced = format!("```\n{}\n```", VALID_ARRAY);
        let records = extract_mcq_records(&fenced).unwrap();
        assert_eq!(records.len(), 2);
    }

    /// 解释性文字与围栏同时出现（最常见的真实畸形）：
    /// 两步提取必须依次生效，不能因为发现围栏就跳过括号定位
    #[test]
    fn test_prose_before_fenced_array() {
        let wrapped = format!("Sure, here are the questions:\n\n```json\n{}\n```", VALID_ARRAY);
        let records = extract_mcq_records(&wrapped).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_fenced_array_with_trailing_prose() {
        let wrapped = format!("```json\n{}\n```\nHope this helps!", VALID_ARRAY);
        let records = extract_mcq_records(&wrapped).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_prose_wrapped_array() {
        let wrapped = format!(
            "Sure! Here are your questions:\n{}\nLet me know if you need more.",
            VALID_ARRAY
        );
        let records = extract_mcq_records(&wrapped).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_element_for_element_equality() {
        let expected: Vec<Value> = serde_json::from_str(VALID_ARRAY).unwrap();
        let records = extract_mcq_records(VALID_ARRAY).unwrap();
        assert_eq!(records, expected);
    }

    #[test]
    fn test_non_array_is_structure_error() {
        let result = extract_mcq_records(r#"{"question": "only one object"}"#);
        match result {
            Err(AppError::Parse(ParseError::NotAnArray { found })) => {
                assert_eq!(found, "object");
            }
            other => panic!("预期 NotAnArray 错误, 实际: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_garbage_is_decode_error_with_snippet() {
        let garbage = "I could not generate questions today, sorry.".repeat(20);
        let result = extract_mcq_records(&garbage);
        match result {
            Err(AppError::Parse(ParseError::JsonDecodeFailed { snippet, .. })) => {
                assert!(snippet.chars().count() <= SNIPPET_LEN + 3);
                assert!(snippet.starts_with("I could not generate"));
            }
            other => panic!("预期 JsonDecodeFailed 错误, 实际: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_empty_response_is_decode_error() {
        assert!(extract_mcq_records("").is_err());
        assert!(extract_mcq_records("   \n  ").is_err());
    }
}
