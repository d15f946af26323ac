//! Ollama API 客户端
//!
//! 封装对补全服务 `/api/generate` 端点的调用

use std::time::Duration;

use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::error::{AppError, Result};

/// 请求超时：补全服务生成可能很慢，放宽到 300 秒
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// 列出模型的超时
const LIST_MODELS_TIMEOUT: Duration = Duration::from_secs(30);

/// Ollama 客户端
///
/// 职责：
/// - 向可配置的基础 URL 发送 JSON 生成请求
/// - 可选 Bearer 认证（密钥为空时发送未认证请求）
/// - 不做重试，不关心提示词内容
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OllamaClient {
    /// 创建新的 Ollama 客户端
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Other(format!("HTTP 客户端初始化失败: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// 调用生成端点
    ///
    /// # 参数
    /// - `model`: 模型名称（如 'llama2'）
    /// - `prompt`: 输入提示词
    /// - `params`: 附加采样参数（temperature、top_p 等），合并进请求体顶层
    ///
    /// # 返回
    /// 返回生成的文本；响应中缺少 `response` 字段时返回空字符串
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
        params: &Map<String, Value>,
    ) -> Result<String> {
        let endpoint = format!("{}/api/generate", self.base_url);

        debug!("调用 Ollama API，模型: {}", model);
        debug!("提示词长度: {} 字符", prompt.chars().count());

        let mut payload = json!({
            "model": model,
            "prompt": prompt,
            "stream": false,
        });
        if let Some(body) = payload.as_object_mut() {
            for (key, value) in params {
                body.insert(key.clone(), value.clone());
            }
        }

        let mut request = self.client.post(&endpoint).json(&payload);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await.map_err(|e| {
            warn!("Ollama API 请求失败: {}", e);
            AppError::api_request_failed(&endpoint, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Ollama API 返回错误状态码: {}", status);
            return Err(AppError::api_bad_status(&endpoint, status.as_u16()));
        }

        let result: Value = response
            .json()
            .await
            .map_err(|e| AppError::api_json_parse_failed(&endpoint, e))?;

        debug!("Ollama API 调用成功");

        Ok(result
            .get("response")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string())
    }

    /// 列出可用模型
    ///
    /// 任何失败都只记录警告并返回空列表，不影响主流程
    pub async fn list_models(&self) -> Vec<String> {
        let endpoint = format!("{}/api/tags", self.base_url);

        let mut request = self.client.get(&endpoint).timeout(LIST_MODELS_TIMEOUT);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("获取模型列表失败: {}", e);
                return Vec::new();
            }
        };

        let result: Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!("解析模型列表失败: {}", e);
                return Vec::new();
            }
        };

        result
            .get("models")
            .and_then(|v| v.as_array())
            .map(|models| {
                models
                    .iter()
                    .filter_map(|m| m.get("name").and_then(|n| n.as_str()))
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = OllamaClient::new("http://localhost:11434/", "").unwrap();
        assert_eq!(client.base_url, "http://localhost:11434");
    }

    /// 连接被拒绝应映射为 ApiError::RequestFailed，而不是 panic 或其他错误
    #[test]
    fn test_generate_connection_refused_maps_to_api_error() {
        // 端口 9 (discard) 几乎不可能有服务监听
        let client = OllamaClient::new("http://127.0.0.1:9", "").unwrap();
        let result = tokio_test::block_on(client.generate("llama2", "hello", &Map::new()));

        match result {
            Err(AppError::Api(ApiError::RequestFailed { endpoint, .. })) => {
                assert!(endpoint.contains("/api/generate"));
            }
            other => panic!("预期 RequestFailed 错误, 实际: {:?}", other.map(|_| ())),
        }
    }

    /// list_models 在后端不可达时返回空列表而不是错误
    #[test]
    fn test_list_models_unreachable_returns_empty() {
        let client = OllamaClient::new("http://127.0.0.1:9", "").unwrap();
        let models = tokio_test::block_on(client.list_models());
        assert!(models.is_empty());
    }
}
