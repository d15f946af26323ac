//! 编排层
//!
//! 负责一次完整调用的资源与顺序：命令行参数 → 输入门 → 读取文本 →
//! 文本门 → 生成流程 → 集合校验 → 落盘 → 统计

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::clients::{parse_backend_kind, BackendClient, BackendKind};
use crate::config::Config;
use crate::error::{AppError, FileError, InputError};
use crate::models::GenerationRequest;
use crate::services::validator::{enforce_source_text, validate_mcq_list, validate_workflow_inputs};
use crate::utils::logging::{log_startup, print_final_stats};
use crate::workflow::GenerationFlow;

/// 命令行参数
///
/// 位置参数：filename difficulty num_questions
/// 选项：--backend、--model、--api-url、--input、--output
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub filename: String,
    pub difficulty: String,
    pub num_questions: String,
    pub backend: Option<String>,
    pub model: Option<String>,
    pub api_url: Option<String>,
    pub input: Option<String>,
    pub output: Option<String>,
}

impl CliArgs {
    /// 从参数迭代器解析（不含程序名）
    pub fn parse(mut args: impl Iterator<Item = String>) -> crate::error::Result<Self> {
        let mut positionals: Vec<String> = Vec::new();
        let mut backend = None;
        let mut model = None;
        let mut api_url = None;
        let mut input = None;
        let mut output = None;

        while let Some(arg) = args.next() {
            if let Some(flag) = arg.strip_prefix("--") {
                let value = args.next().ok_or_else(|| {
                    AppError::Input(InputError::MissingArgument {
                        name: format!("--{} 的值", flag),
                    })
                })?;
                match flag {
                    "backend" => backend = Some(value),
                    "model" => model = Some(value),
                    "api-url" => api_url = Some(value),
                    "input" => input = Some(value),
                    "output" => output = Some(value),
                    _ => {
                        return Err(AppError::Input(InputError::UnknownOption { flag: arg }));
                    }
                }
            } else {
                positionals.push(arg);
            }
        }

        let mut positionals = positionals.into_iter();
        let mut next_positional = |name: &str| {
            positionals.next().ok_or_else(|| {
                AppError::Input(InputError::MissingArgument {
                    name: name.to_string(),
                })
            })
        };

        let parsed = Self {
            filename: next_positional("filename")?,
            difficulty: next_positional("difficulty")?,
            num_questions: next_positional("num_questions")?,
            backend,
            model,
            api_url,
            input,
            output,
        };

        // 多出来的位置参数通常是调用方写错了命令行，拒绝而不是静默丢弃
        if let Some(extra) = positionals.next() {
            return Err(AppError::Input(InputError::UnexpectedArgument {
                given: extra,
            }));
        }

        Ok(parsed)
    }
}

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 运行应用主逻辑
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        // 输入门：任何后端调用之前拦截非法参数
        let params =
            validate_workflow_inputs(&args.filename, &args.difficulty, &args.num_questions)?;

        // 后端选择与客户端构建
        let kind = match args.backend.as_deref() {
            Some(s) => parse_backend_kind(s)?,
            None => BackendKind::Ollama,
        };
        let client = BackendClient::from_config(kind, &self.config, args.api_url.as_deref())?;
        let model = args
            .model
            .clone()
            .unwrap_or_else(|| client.default_model(&self.config).to_string());

        log_startup(kind.name(), &model, &params.filename);

        // 读取提取文本
        let input_path = args
            .input
            .as_deref()
            .unwrap_or(&self.config.input_text_file);
        let source_text = read_source_text(input_path)?;

        // 文本门：长度越界即致命，偏短/很长只警告
        let text_report = enforce_source_text(&source_text)?;
        for warning in &text_report.warnings {
            warn!("⚠️ {}", warning);
        }
        info!(
            "📄 源文本: {} 字符 / {} 词 / {} 行",
            text_report.stats.length, text_report.stats.word_count, text_report.stats.line_count
        );

        // 详细模式下顺带探测补全服务的可用模型
        if self.config.verbose_logging {
            if let BackendClient::Ollama(ollama) = &client {
                let models = ollama.list_models().await;
                debug!("可用模型: {:?}", models);
            }
        }

        // 生成
        let request = GenerationRequest {
            source_text,
            difficulty: params.difficulty,
            num_questions: params.num_questions,
        };
        let flow = GenerationFlow::new(self.config.verbose_logging);
        let (records, outcome) = flow.run(&client, &model, &request).await?;

        // 集合级结构校验
        // 结构校验失败不阻断落盘：集合照常写出，问题如实汇报给调用方
        let report = validate_mcq_list(&records);
        for error in &report.errors {
            error!("❌ {}", error);
        }
        for warning in &report.warnings {
            warn!("⚠️ {}", warning);
        }
        if !report.valid {
            warn!(
                "⚠️ 结构校验未全部通过: {}/{} 有效",
                report.stats.valid_questions, report.stats.total_questions
            );
        }

        // 落盘
        let output_path = args
            .output
            .as_deref()
            .unwrap_or(&self.config.output_json_file);
        write_mcq_output(output_path, &records)?;

        print_final_stats(&report, outcome, output_path);

        Ok(())
    }
}

/// 读取提取文本文件
fn read_source_text(path: &str) -> crate::error::Result<String> {
    if !Path::new(path).exists() {
        return Err(AppError::File(FileError::NotFound {
            path: path.to_string(),
        }));
    }

    fs::read_to_string(path).map_err(|e| AppError::file_read_failed(path, e))
}

/// 将 MCQ 记录数组写为 JSON 文件（缩进 2 空格）
fn write_mcq_output(path: &str, records: &[Value]) -> crate::error::Result<String> {
    let json = serde_json::to_string_pretty(records)
        .map_err(|e| AppError::Other(format!("序列化输出失败: {}", e)))?;

    fs::write(path, &json).map_err(|e| AppError::file_write_failed(path, e))?;

    info!("💾 已写出 {} 条 MCQ 记录到 {}", records.len(), path);

    Ok(json)
}
