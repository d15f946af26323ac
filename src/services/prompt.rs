//! 提示词构建 - 业务能力层
//!
//! 纯函数：相同输入永远产生相同的提示词，无副作用

use crate::models::GenerationRequest;

/// 截断源文本到指定字符数，超出部分以 "..." 标记
fn truncate_source_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        text.chars().take(max_chars).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

/// 构建 MCQ 生成提示词
///
/// 提示词内嵌输出结构示例（一道带标签选项的例题）和字面目标数量。
///
/// # 参数
/// - `request`: 生成请求（源文本、难度、题目数量）
/// - `max_chars`: 后端的提示词字符上限；受限后端（托管推理）传 `Some`，
///   源文本超出时截断并追加 "..." 标记；能力充足的后端传 `None`
pub fn build_generation_prompt(request: &GenerationRequest, max_chars: Option<usize>) -> String {
    let text = match max_chars {
        Some(limit) => truncate_source_text(&request.source_text, limit),
        None => request.source_text.clone(),
    };

    format!(
        r#"You are an expert educational content creator. Generate {num} high-quality multiple choice questions from the provided text content.

## Instructions:
- Difficulty Level: {difficulty}
- Create questions that test understanding, not just memorization
- Each question must have exactly 4 options (A, B, C, D)
- Only one correct answer per question
- Make distractors plausible but clearly incorrect
- Provide educational explanations that teach concepts

## Difficulty Guidelines:
- **Easy**: Basic recall, definitions, simple concepts
- **Medium**: Application of concepts, analysis, moderate complexity
- **Hard**: Synthesis, evaluation, complex reasoning, critical thinking

## Output Format:
Return ONLY a valid JSON array with this exact structure:

```json
[
  {{
    "question": "What is the main purpose of photosynthesis?",
    "options": [
      "A) To produce oxygen for animals",
      "B) To convert sunlight into chemical energy",
      "C) To remove carbon dioxide from the atmosphere",
      "D) To create water molecules"
    ],
    "correct_answer": "B",
    "explanation": "Photosynthesis primarily converts light energy into chemical energy (glucose), which plants use for growth and metabolism. While it does produce oxygen as a byproduct, that's not its main purpose."
  }}
]
```

## Text Content:
{text}

Generate {num} questions now. Return only the JSON array, no additional text."#,
        num = request.num_questions,
        difficulty = request.difficulty,
        text = text,
    )
}
