//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::models::ValidationReport;
use crate::workflow::GenerationOutcome;

/// 初始化全局日志订阅器
///
/// 级别由 RUST_LOG 环境变量控制，默认 info。
/// 重复调用（如测试中）是安全的
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(backend: &str, model: &str, filename: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - MCQ 生成流水线");
    info!("📄 源文件: {}", filename);
    info!("🔌 后端: {} / 模型: {}", backend, model);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(
    report: &ValidationReport,
    outcome: GenerationOutcome,
    output_path: &str,
) {
    info!("{}", "=".repeat(60));
    info!("📊 生成完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!(
        "✅ 结构有效: {}/{}",
        report.stats.valid_questions, report.stats.total_questions
    );
    info!("❌ 结构无效: {}", report.stats.invalid_questions);
    if outcome == GenerationOutcome::FallbackApplied {
        info!("🛟 本次结果来自兜底生成");
    }
    info!("{}", "=".repeat(60));
    info!("结果已保存至: {}", output_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
