//! 兜底 MCQ 合成 - 业务能力层
//!
//! 后端或解析不可恢复地失败时，从源文本直接合成低质量但结构合法的
//! MCQ，保证流水线总能产出结果。质量刻意压低：它的存在只是为了
//! 终止性，不追求教学价值。

use crate::models::{AnswerKey, Difficulty, Mcq};

/// 候选关键词池上限
const MAX_KEYWORDS: usize = 10;

/// 兜底路径最多产出的题目数
const MAX_FALLBACK_QUESTIONS: u32 = 3;

/// 关键词的最小长度（纯字母 token）
const MIN_KEYWORD_LEN: usize = 5;

/// 从源文本合成兜底 MCQ
///
/// 纯函数，永不失败；没有合格关键词时返回空集合。
/// 产出数量不超过 `min(num_questions, 3)`，每题固定正确答案 A。
pub fn generate_fallback_mcqs(
    source_text: &str,
    _difficulty: Difficulty,
    num_questions: u32,
) -> Vec<Mcq> {
    let keywords = extract_keywords(source_text);

    let count = num_questions.min(MAX_FALLBACK_QUESTIONS) as usize;

    keywords
        .into_iter()
        .take(count)
        .map(|word| Mcq {
            question: format!("What is the main topic related to '{}' in the text?", word),
            options: vec![
                format!("A) {} is a key concept", word),
                format!("B) {} is mentioned briefly", word),
                format!("C) {} is not important", word),
                format!("D) {} is undefined", word),
            ],
            correct_answer: AnswerKey::A,
            explanation: format!("The text discusses {} as an important concept.", word),
        })
        .collect()
}

/// 提取候选关键词
///
/// 按空白切分，保留长度大于 5 的纯字母 token，
/// 按首次出现顺序去重，最多取前 10 个
fn extract_keywords(text: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();

    for token in text.split_whitespace() {
        if token.chars().count() > MIN_KEYWORD_LEN && token.chars().all(|c| c.is_alphabetic()) {
            if !keywords.iter().any(|k| k == token) {
                keywords.push(token.to_string());
            }
        }
        if keywords.len() >= MAX_KEYWORDS {
            break;
        }
    }

    keywords
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::validator::validate_mcq_list;

    #[test]
    fn test_photosynthesis_example() {
        let text = "Photosynthesis converts sunlight into chemical energy";
        let mcqs = generate_fallback_mcqs(text, Difficulty::Easy, 2);

        assert!(mcqs.len() <= 2);
        assert!(!mcqs.is_empty());

        let qualifying: Vec<&str> = text
            .split_whitespace()
            .filter(|w| w.chars().count() > 5 && w.chars().all(|c| c.is_alphabetic()))
            .collect();
        for mcq in &mcqs {
            assert!(
                qualifying.iter().any(|w| mcq.question.contains(w)),
                "题干应引用源文本中的关键词: {}",
                mcq.question
            );
            assert_eq!(mcq.correct_answer, AnswerKey::A);
            assert_eq!(mcq.options.len(), 4);
        }
    }

    #[test]
    fn test_fallback_output_passes_structural_validation() {
        let text = "Photosynthesis converts sunlight into chemical energy inside chloroplasts";
        let mcqs = generate_fallback_mcqs(text, Difficulty::Medium, 3);

        let records: Vec<serde_json::Value> = mcqs
            .iter()
            .map(|m| serde_json::to_value(m).unwrap())
            .collect();
        let report = validate_mcq_list(&records);
        assert!(report.valid, "兜底产出必须通过结构校验: {:?}", report.errors);
    }

    #[test]
    fn test_capped_at_three_questions() {
        let text = "Photosynthesis chlorophyll chloroplast sunlight glucose metabolism";
        let mcqs = generate_fallback_mcqs(text, Difficulty::Hard, 20);
        assert_eq!(mcqs.len(), 3);
    }

    #[test]
    fn test_no_qualifying_tokens_yields_empty() {
        // 全部 token 过短或含非字母字符
        let text = "a bb c3c dd-dd ee 12345 ff.";
        let mcqs = generate_fallback_mcqs(text, Difficulty::Easy, 5);
        assert!(mcqs.is_empty());
    }

    #[test]
    fn test_duplicate_tokens_dropped() {
        let text = "mitochondria mitochondria mitochondria ribosome";
        let keywords = extract_keywords(text);
        assert_eq!(keywords, vec!["mitochondria", "ribosome"]);
    }

    #[test]
    fn test_is_pure_function() {
        let text = "Photosynthesis converts sunlight into chemical energy";
        let a = generate_fallback_mcqs(text, Difficulty::Easy, 2);
        let b = generate_fallback_mcqs(text, Difficulty::Easy, 2);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.question, y.question);
            assert_eq!(x.options, y.options);
        }
    }
}
