/// 程序配置
///
/// 进程启动时从环境变量读取一次，之后只读
#[derive(Clone, Debug)]
pub struct Config {
    /// Ollama API 基础 URL
    pub ollama_api_base_url: String,
    /// Ollama API 密钥（可为空，空时发送未认证请求）
    pub ollama_api_key: String,
    /// Hugging Face API 密钥（可为空，空时发送未认证请求）
    pub huggingface_api_key: String,
    /// Ollama 默认模型
    pub ollama_default_model: String,
    /// Hugging Face 默认模型
    pub huggingface_default_model: String,
    /// 提取文本的输入文件路径
    pub input_text_file: String,
    /// MCQ 输出文件路径
    pub output_json_file: String,
    /// 是否显示详细日志（环境变量接受 "1" / "true"，其余值视为关闭）
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ollama_api_base_url: "http://localhost:11434".to_string(),
            ollama_api_key: String::new(),
            huggingface_api_key: String::new(),
            ollama_default_model: "llama2".to_string(),
            huggingface_default_model: "microsoft/DialoGPT-medium".to_string(),
            input_text_file: "extracted_text.txt".to_string(),
            output_json_file: "mcq_output.json".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            ollama_api_base_url: std::env::var("OLLAMA_API_URL").unwrap_or(default.ollama_api_base_url),
            ollama_api_key: std::env::var("OLLAMA_API_KEY").unwrap_or(default.ollama_api_key),
            huggingface_api_key: std::env::var("HUGGINGFACE_API_KEY").unwrap_or(default.huggingface_api_key),
            ollama_default_model: std::env::var("OLLAMA_MODEL").unwrap_or(default.ollama_default_model),
            huggingface_default_model: std::env::var("HUGGINGFACE_MODEL").unwrap_or(default.huggingface_default_model),
            input_text_file: std::env::var("INPUT_TEXT_FILE").unwrap_or(default.input_text_file),
            output_json_file: std::env::var("OUTPUT_JSON_FILE").unwrap_or(default.output_json_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").map(|v| parse_flag(&v)).unwrap_or(default.verbose_logging),
        }
    }
}

/// 解析布尔型环境变量："1" 和 "true"（不区分大小写）开启，其余值关闭
fn parse_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_one_and_true() {
        assert!(parse_flag("1"));
        assert!(parse_flag("true"));
        assert!(parse_flag("TRUE"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("yes"));
        assert!(!parse_flag(""));
    }
}
