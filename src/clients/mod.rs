//! 后端客户端层
//!
//! 封装两种文本生成后端的 HTTP 调用：
//! - `OllamaClient` - 本地/自建补全服务（可配置地址）
//! - `HuggingFaceClient` - 托管推理服务（固定端点，按模型名路由）

pub mod huggingface;
pub mod ollama;

pub use huggingface::HuggingFaceClient;
pub use ollama::OllamaClient;

use serde_json::{json, Map, Value};

use crate::config::Config;
use crate::error::{AppError, InputError, Result};

/// 后端变体标识
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// 补全服务（Ollama 协议）
    Ollama,
    /// 托管推理服务（Hugging Face Inference API）
    HuggingFace,
}

impl BackendKind {
    pub fn name(self) -> &'static str {
        match self {
            BackendKind::Ollama => "ollama",
            BackendKind::HuggingFace => "huggingface",
        }
    }

    /// 尝试从字符串解析后端类型
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ollama" => Some(BackendKind::Ollama),
            "huggingface" | "hf" => Some(BackendKind::HuggingFace),
            _ => None,
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 统一的后端客户端
///
/// 两个变体都暴露 `generate(model, prompt, params) -> String`。
/// 客户端内部不做重试；重试策略（如果有）属于流程层（当前：无）。
pub enum BackendClient {
    Ollama(OllamaClient),
    HuggingFace(HuggingFaceClient),
}

impl BackendClient {
    /// 根据后端类型和配置创建客户端
    ///
    /// `api_url_override` 仅对 Ollama 生效（命令行 --api-url）；
    /// Hugging Face 端点固定，按模型名路由。
    pub fn from_config(
        kind: BackendKind,
        config: &Config,
        api_url_override: Option<&str>,
    ) -> Result<Self> {
        match kind {
            BackendKind::Ollama => {
                let base_url = api_url_override.unwrap_or(&config.ollama_api_base_url);
                Ok(BackendClient::Ollama(OllamaClient::new(
                    base_url,
                    &config.ollama_api_key,
                )?))
            }
            BackendKind::HuggingFace => Ok(BackendClient::HuggingFace(HuggingFaceClient::new(
                &config.huggingface_api_key,
            )?)),
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            BackendClient::Ollama(_) => BackendKind::Ollama,
            BackendClient::HuggingFace(_) => BackendKind::HuggingFace,
        }
    }

    /// 调用后端生成文本
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
        params: &Map<String, Value>,
    ) -> Result<String> {
        match self {
            BackendClient::Ollama(client) => client.generate(model, prompt, params).await,
            BackendClient::HuggingFace(client) => client.generate(model, prompt, params).await,
        }
    }

    /// 后端的提示词长度上限（字符数）
    ///
    /// Ollama 无上限；Hugging Face 受 token 限制，上游截断到 2000 字符
    pub fn max_prompt_chars(&self) -> Option<usize> {
        match self {
            BackendClient::Ollama(_) => None,
            BackendClient::HuggingFace(_) => Some(huggingface::HF_MAX_PROMPT_CHARS),
        }
    }

    /// 失败时是否走兜底生成
    ///
    /// 按后端区分的既有策略：补全服务（Ollama）路径上后端/解析失败直接致命，
    /// 托管推理（Hugging Face）路径上触发兜底。两条路径刻意不统一。
    pub fn fallback_on_failure(&self) -> bool {
        matches!(self, BackendClient::HuggingFace(_))
    }

    /// 该后端的默认模型名
    pub fn default_model<'a>(&self, config: &'a Config) -> &'a str {
        match self {
            BackendClient::Ollama(_) => &config.ollama_default_model,
            BackendClient::HuggingFace(_) => &config.huggingface_default_model,
        }
    }

    /// 该后端的默认采样参数
    pub fn default_params(&self) -> Map<String, Value> {
        let value = match self {
            BackendClient::Ollama(_) => json!({
                "temperature": 0.7,
                "top_p": 0.9,
                "top_k": 40,
            }),
            BackendClient::HuggingFace(_) => json!({
                "max_new_tokens": 1500,
                "temperature": 0.7,
            }),
        };
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

/// 解析命令行/环境变量中的后端标识
pub fn parse_backend_kind(s: &str) -> Result<BackendKind> {
    BackendKind::from_str(s).ok_or_else(|| {
        AppError::Input(InputError::UnknownBackend {
            given: s.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_from_str() {
        assert_eq!(BackendKind::from_str("ollama"), Some(BackendKind::Ollama));
        assert_eq!(
            BackendKind::from_str("huggingface"),
            Some(BackendKind::HuggingFace)
        );
        assert_eq!(BackendKind::from_str("hf"), Some(BackendKind::HuggingFace));
        assert_eq!(BackendKind::from_str("openai"), None);
    }

    #[test]
    fn test_fallback_policy_is_per_backend() {
        let config = Config::default();

        let ollama = BackendClient::from_config(BackendKind::Ollama, &config, None).unwrap();
        assert!(!ollama.fallback_on_failure());
        assert_eq!(ollama.max_prompt_chars(), None);

        let hf = BackendClient::from_config(BackendKind::HuggingFace, &config, None).unwrap();
        assert!(hf.fallback_on_failure());
        assert_eq!(hf.max_prompt_chars(), Some(2000));
    }

    #[test]
    fn test_default_params_shape() {
        let config = Config::default();
        let ollama = BackendClient::from_config(BackendKind::Ollama, &config, None).unwrap();
        let params = ollama.default_params();
        assert!(params.contains_key("temperature"));
        assert!(params.contains_key("top_k"));

        let hf = BackendClient::from_config(BackendKind::HuggingFace, &config, None).unwrap();
        assert!(hf.default_params().contains_key("max_new_tokens"));
    }
}
