//! 视频生成流程 - 流程层
//!
//! 核心职责：把四个能力按固定顺序串起来
//!
//! 流程顺序：
//! 1. 生成解题步骤（LLM）
//! 2. 渲染无声动画（场景渲染器）
//! 3. 合成整段配音（TTS）
//! 4. 合并音视频（ffmpeg）

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::config::Config;
use crate::models::Step;
use crate::render::{RenderOptions, SceneRenderer};
use crate::services::{ExplainerService, Muxer, NarratorService};

/// 视频生成流程
///
/// 职责：
/// - 编排完整的生成流程
/// - 管理每次运行独立的临时工作目录
/// - 统一捕获所有错误，向调用方只暴露"有没有结果"
pub struct VideoFlow {
    explainer: ExplainerService,
    renderer: SceneRenderer,
    narrator: NarratorService,
    muxer: Muxer,
    output_path: PathBuf,
}

impl VideoFlow {
    /// 创建新的视频生成流程
    ///
    /// 所有凭证和参数都来自显式传入的配置，没有进程级全局状态。
    pub fn new(config: &Config) -> Self {
        Self {
            explainer: ExplainerService::new(config),
            renderer: SceneRenderer::new(RenderOptions::from_config(config)),
            narrator: NarratorService::new(config),
            muxer: Muxer::new(),
            output_path: PathBuf::from(&config.output_path),
        }
    }

    /// 生成讲解视频
    ///
    /// # 参数
    /// - `question`: 用户输入的数学问题
    ///
    /// # 返回
    /// 成功返回最终视频路径；任何一步失败都只记录日志并返回 None
    pub async fn create_video(&self, question: &str) -> Option<PathBuf> {
        match self.try_create(question).await {
            Ok(path) => Some(path),
            Err(e) => {
                error!("❌ 生成讲解视频失败: {:#}", e);
                None
            }
        }
    }

    /// 实际的生成流程，任何错误都向上抛给 `create_video` 收口
    async fn try_create(&self, question: &str) -> Result<PathBuf> {
        // 每次运行独立的临时目录，Drop 时连同中间产物一起删除，
        // 成功和失败走的是同一条清理路径
        let workdir = tempfile::Builder::new()
            .prefix("math-explainer-")
            .tempdir()
            .context("创建临时工作目录失败")?;

        let scene_path = workdir.path().join("scene.mp4");
        let audio_path = workdir.path().join("narration.mp3");

        // 1. 生成解题步骤
        info!("🧠 正在生成解题步骤...");
        let steps = self.explainer.generate(question).await?;
        if steps.is_empty() {
            anyhow::bail!("LLM 没有返回任何解题步骤");
        }
        info!("✓ 共生成 {} 个解题步骤", steps.len());

        // 2. 渲染无声动画（CPU 密集，放到阻塞线程）
        info!("🎞️ 正在渲染讲解动画...");
        self.render_scene(&steps, &scene_path).await?;
        info!("✓ 无声视频渲染完成");

        // 3. 合成整段配音
        info!("🎙️ 正在合成配音...");
        self.narrator.synthesize(&steps, &audio_path).await?;

        // 4. 合并音视频到最终输出路径
        info!("🔊 正在合并音视频...");
        self.muxer
            .mux(&scene_path, &audio_path, &self.output_path)
            .await?;

        Ok(self.output_path.clone())
    }

    /// 在阻塞线程上执行渲染
    async fn render_scene(&self, steps: &[Step], scene_path: &Path) -> Result<()> {
        let renderer = self.renderer.clone();
        let steps = steps.to_vec();
        let scene_path = scene_path.to_path_buf();

        tokio::task::spawn_blocking(move || renderer.render(&steps, &scene_path))
            .await
            .context("渲染任务意外中止")?
    }
}
