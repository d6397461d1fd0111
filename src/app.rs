use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::config::Config;
use crate::workflow::VideoFlow;

/// 应用主结构
pub struct App {
    config: Config,
    flow: VideoFlow,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let flow = VideoFlow::new(&config);

        Ok(Self { config, flow })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 读取问题（阻塞在一行标准输入上）
        println!("请输入数学问题: ");
        let mut question = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut question)
            .await?;
        let question = question.trim();

        if question.is_empty() {
            warn!("⚠️ 没有输入任何问题，程序结束");
            return Ok(());
        }

        if self.config.verbose_logging {
            info!("📝 问题内容: {}", question);
        }

        info!("⏳ 正在生成讲解视频...");

        match self.flow.create_video(question).await {
            Some(path) => {
                info!("✅ 讲解视频已生成: {}", path.display());
            }
            None => {
                warn!("❌ 讲解视频生成失败");
            }
        }

        Ok(())
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 数学讲解视频生成");
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🤖 LLM 模型: {}", config.llm_model_name);
    info!("🎙️ TTS 音色: {}", config.tts_voice_id);
    info!(
        "🎬 画布: {}x{} @ {}fps",
        config.video_width, config.video_height, config.video_fps
    );
    info!("📁 输出路径: {}", config.output_path);
    info!("{}", "=".repeat(60));
}
