use anyhow::Result;
use exam_authoring::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    let stats = App::initialize(config).await?.run().await?;

    if stats.exams_created < stats.sheets
        || stats.questions_failed + stats.questions_skipped > 0
    {
        std::process::exit(2);
    }

    Ok(())
}
