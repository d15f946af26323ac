use anyhow::Result;
use mcq_generator::utils::logging;
use mcq_generator::{App, CliArgs, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 解析命令行参数
    let args = CliArgs::parse(std::env::args().skip(1))?;

    // 运行流水线
    App::new(config).run(args).await
}
