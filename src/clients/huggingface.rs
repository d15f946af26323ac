//! Hugging Face Inference API 客户端
//!
//! 托管推理服务，端点固定，按模型名路由

use std::time::Duration;

use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::error::{AppError, Result};

/// 固定的托管推理端点
const HF_API_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// 托管服务有 token 限制，提示词在上游截断到此字符数
pub const HF_MAX_PROMPT_CHARS: usize = 2000;

/// 请求超时：托管服务比本地补全服务更快失败
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Hugging Face 客户端
pub struct HuggingFaceClient {
    client: reqwest::Client,
    api_key: String,
}

impl HuggingFaceClient {
    /// 创建新的 Hugging Face 客户端
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Other(format!("HTTP 客户端初始化失败: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }

    /// 调用托管推理端点
    ///
    /// 请求体为 `{inputs, parameters}`；`params` 合并进 `parameters`，
    /// 覆盖同名默认值。
    ///
    /// 响应可能是 `[{generated_text}]` 形式的单元素数组，也可能是任意
    /// JSON 值，统一归一化为字符串；缺少预期字段时返回空字符串（设计上
    /// 非致命，交由解析层和兜底路径处理）。
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
        params: &Map<String, Value>,
    ) -> Result<String> {
        let endpoint = format!("{}/{}", HF_API_BASE_URL, model);

        debug!("调用 Hugging Face API，模型: {}", model);
        debug!("提示词长度: {} 字符", prompt.chars().count());

        let mut parameters = json!({
            "max_new_tokens": 1000,
            "temperature": 0.7,
            "top_p": 0.9,
            "return_full_text": false,
        });
        if let Some(map) = parameters.as_object_mut() {
            for (key, value) in params {
                map.insert(key.clone(), value.clone());
            }
        }

        let payload = json!({
            "inputs": prompt,
            "parameters": parameters,
        });

        let mut request = self.client.post(&endpoint).json(&payload);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await.map_err(|e| {
            warn!("Hugging Face API 请求失败: {}", e);
            AppError::api_request_failed(&endpoint, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Hugging Face API 返回错误状态码: {}", status);
            return Err(AppError::api_bad_status(&endpoint, status.as_u16()));
        }

        let result: Value = response
            .json()
            .await
            .map_err(|e| AppError::api_json_parse_failed(&endpoint, e))?;

        debug!("Hugging Face API 调用成功");

        Ok(normalize_response(&result))
    }
}

/// 归一化托管推理服务的响应形状
///
/// 单元素数组取第一个元素的 `generated_text`（缺失则为空字符串）；
/// 其他任意 JSON 值强转为其字符串表示
fn normalize_response(result: &Value) -> String {
    match result {
        Value::Array(items) => items
            .first()
            .and_then(|item| item.get("generated_text"))
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
