use anyhow::Result;
use math_explainer::app::App;
use math_explainer::config::Config;
use math_explainer::logger;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置（缺少 API 凭证会在这里直接报错退出，不会进入流水线）
    let config = Config::from_env()?;

    // 初始化并运行应用
    App::initialize(config)?.run().await?;

    Ok(())
}
