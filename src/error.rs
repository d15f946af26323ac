use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 输入参数错误（命令行参数、难度、题目数量）
    Input(InputError),
    /// 源文本错误（过短/过长）
    Text(TextError),
    /// 后端 API 调用错误
    Api(ApiError),
    /// 响应解析错误
    Parse(ParseError),
    /// 文件操作错误
    File(FileError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Input(e) => write!(f, "输入错误: {}", e),
            AppError::Text(e) => write!(f, "源文本错误: {}", e),
            AppError::Api(e) => write!(f, "API错误: {}", e),
            AppError::Parse(e) => write!(f, "解析错误: {}", e),
            AppError::File(e) => write!(f, "文件错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Input(e) => Some(e),
            AppError::Text(e) => Some(e),
            AppError::Api(e) => Some(e),
            AppError::Parse(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// 输入参数错误
///
/// 这些错误在任何后端调用之前被拦截
#[derive(Debug)]
pub enum InputError {
    /// 文件名为空
    EmptyFilename,
    /// 难度级别无效
    InvalidDifficulty {
        given: String,
    },
    /// 题目数量无法解析为整数
    InvalidQuestionCount {
        given: String,
    },
    /// 题目数量超出范围 [1, 20]
    QuestionCountOutOfRange {
        count: i64,
    },
    /// 缺少命令行参数
    MissingArgument {
        name: String,
    },
    /// 多余的命令行参数
    UnexpectedArgument {
        given: String,
    },
    /// 未知的命令行选项
    UnknownOption {
        flag: String,
    },
    /// 未知的后端类型
    UnknownBackend {
        given: String,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::EmptyFilename => write!(f, "文件名不能为空"),
            InputError::InvalidDifficulty { given } => {
                write!(f, "难度级别无效: '{}', 必须是 easy、medium、hard 之一", given)
            }
            InputError::InvalidQuestionCount { given } => {
                write!(f, "题目数量必须是有效整数, 实际: '{}'", given)
            }
            InputError::QuestionCountOutOfRange { count } => {
                write!(f, "题目数量必须在 1 到 20 之间, 实际: {}", count)
            }
            InputError::MissingArgument { name } => {
                write!(f, "缺少命令行参数: {}", name)
            }
            InputError::UnexpectedArgument { given } => {
                write!(f, "多余的命令行参数: '{}'", given)
            }
            InputError::UnknownOption { flag } => {
                write!(f, "未知的命令行选项: {}", flag)
            }
            InputError::UnknownBackend { given } => {
                write!(f, "未知的后端类型: '{}', 必须是 ollama 或 huggingface", given)
            }
        }
    }
}

impl std::error::Error for InputError {}

/// 源文本错误
#[derive(Debug)]
pub enum TextError {
    /// 文本过短
    TooShort {
        length: usize,
        min: usize,
    },
    /// 文本过长
    TooLong {
        length: usize,
        max: usize,
    },
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextError::TooShort { length, min } => {
                write!(f, "文本过短: {} 个字符, 最少需要 {} 个", length, min)
            }
            TextError::TooLong { length, max } => {
                write!(f, "文本过长: {} 个字符, 最多允许 {} 个", length, max)
            }
        }
    }
}

impl std::error::Error for TextError {}

/// 后端 API 调用错误
#[derive(Debug)]
pub enum ApiError {
    /// 网络请求失败（包含超时）
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 返回非 2xx 状态码
    BadStatus {
        endpoint: String,
        status: u16,
    },
    /// API 响应 JSON 解析失败
    JsonParseFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RequestFailed { endpoint, source } => {
                write!(f, "API请求失败 ({}): {}", endpoint, source)
            }
            ApiError::BadStatus { endpoint, status } => {
                write!(f, "API返回错误状态码 ({}): {}", endpoint, status)
            }
            ApiError::JsonParseFailed { endpoint, source } => {
                write!(f, "API响应JSON解析失败 ({}): {}", endpoint, source)
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::RequestFailed { source, .. }
            | ApiError::JsonParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 响应解析错误
#[derive(Debug)]
pub enum ParseError {
    /// 候选 JSON 解码失败（snippet 保留原始响应前 500 个字符用于诊断）
    JsonDecodeFailed {
        snippet: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 解码结果不是 JSON 数组
    NotAnArray {
        found: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::JsonDecodeFailed { snippet, source } => {
                write!(f, "JSON解码失败: {} (原始响应: {})", source, snippet)
            }
            ParseError::NotAnArray { found } => {
                write!(f, "响应不是JSON数组, 实际类型: {}", found)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::JsonDecodeFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 文件不存在
    NotFound {
        path: String,
    },
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound { path } => write!(f, "文件不存在: {}", path),
            FileError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
            FileError::WriteFailed { path, source } => {
                write!(f, "写入文件失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. } | FileError::WriteFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建API错误状态码错误
    pub fn api_bad_status(endpoint: impl Into<String>, status: u16) -> Self {
        AppError::Api(ApiError::BadStatus {
            endpoint: endpoint.into(),
            status,
        })
    }

    /// 创建API响应JSON解析失败错误
    pub fn api_json_parse_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建JSON解码失败错误（snippet 应为原始响应的截断预览）
    pub fn json_decode_failed(
        snippet: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Parse(ParseError::JsonDecodeFailed {
            snippet: snippet.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type Result<T> = std::result::Result<T, AppError>;
