//! 生成流程 - 流程层
//!
//! 核心职责：定义"一次生成请求"的完整处理流程
//!
//! 流程顺序：
//! 1. 构建提示词（按后端的长度上限截断）
//! 2. 调用后端生成
//! 3. 解析响应为 MCQ 记录数组
//! 4. 失败时按后端策略兜底（仅托管推理路径）
//!
//! 每次调用严格线性，流程自身不持有任何跨请求状态

use anyhow::Result;
use serde_json::Value;
use tracing::{info, warn};

use crate::clients::BackendClient;
use crate::models::GenerationRequest;
use crate::services::fallback::generate_fallback_mcqs;
use crate::services::parser::extract_mcq_records;
use crate::services::prompt::build_generation_prompt;
use crate::utils::logging::truncate_text;

/// 生成结果的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// 后端生成并成功解析
    Generated,
    /// 后端或解析失败，产出来自兜底合成
    FallbackApplied,
}

/// 生成流程
///
/// 职责：
/// - 编排 提示词 → 后端 → 解析 → 兜底 的顺序
/// - 按后端策略决定失败是致命还是兜底
/// - 不做校验（校验属于编排层之后的步骤）
/// - 不做重试
pub struct GenerationFlow {
    verbose_logging: bool,
}

impl GenerationFlow {
    /// 创建新的生成流程
    pub fn new(verbose_logging: bool) -> Self {
        Self { verbose_logging }
    }

    /// 执行一次完整的生成请求
    ///
    /// # 返回
    /// 返回 (MCQ 记录数组, 产出来源)
    ///
    /// 失败策略按后端区分（既有设计，刻意保留）：
    /// - Ollama（补全服务）：后端/解析失败直接向上传播，流程中止
    /// - Hugging Face（托管推理）：后端/解析失败转入兜底合成
    pub async fn run(
        &self,
        client: &BackendClient,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<(Vec<Value>, GenerationOutcome)> {
        // 1. 构建提示词
        let prompt = build_generation_prompt(request, client.max_prompt_chars());

        info!(
            "🧠 使用 {} 后端生成 {} 道题 (难度: {}, 模型: {})",
            client.kind(),
            request.num_questions,
            request.difficulty,
            model
        );
        if self.verbose_logging {
            info!("提示词预览: {}", truncate_text(&prompt, 200));
        }

        // 2. 调用后端
        let raw = match client.generate(model, &prompt, &client.default_params()).await {
            Ok(raw) => raw,
            Err(e) => {
                if client.fallback_on_failure() {
                    warn!("⚠️ 后端调用失败: {}", e);
                    return self.apply_fallback(request);
                }
                return Err(e.into());
            }
        };

        info!("✓ 后端生成完成，响应长度: {} 字符", raw.chars().count());

        // 3. 解析响应
        match extract_mcq_records(&raw) {
            Ok(records) => {
                info!("✓ 成功解析 {} 条 MCQ 记录", records.len());
                Ok((records, GenerationOutcome::Generated))
            }
            Err(e) => {
                if client.fallback_on_failure() {
                    warn!("⚠️ 响应解析失败: {}", e);
                    self.apply_fallback(request)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    /// 兜底路径：从源文本合成结构合法的 MCQ 记录
    fn apply_fallback(
        &self,
        request: &GenerationRequest,
    ) -> Result<(Vec<Value>, GenerationOutcome)> {
        warn!("🛟 转入兜底生成");

        let mcqs = generate_fallback_mcqs(
            &request.source_text,
            request.difficulty,
            request.num_questions,
        );

        info!("✓ 兜底合成 {} 道题", mcqs.len());

        let mut records = Vec::with_capacity(mcqs.len());
        for mcq in &mcqs {
            records.push(serde_json::to_value(mcq)?);
        }

        Ok((records, GenerationOutcome::FallbackApplied))
    }
}
