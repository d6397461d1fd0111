//! 场景渲染器 - 渲染层
//!
//! 把排版、逐帧 SVG 合成和 ffmpeg 编码串起来，产出无声视频。
//! 整个渲染是 CPU 密集的同步过程，调用方应放到阻塞线程里执行。

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::encoder::{EncodeConfig, FfmpegEncoder};
use super::scene::{build_scene, RenderOptions};
use super::svg::render_frame_svg;
use crate::models::Step;

/// 场景渲染器
///
/// 职责：
/// - 排版步骤序列
/// - 逐帧栅格化并送入编码器
/// - 不决定输出路径，由流程层传入
#[derive(Clone)]
pub struct SceneRenderer {
    opts: RenderOptions,
}

impl SceneRenderer {
    /// 创建新的场景渲染器
    pub fn new(opts: RenderOptions) -> Self {
        Self { opts }
    }

    /// 渲染无声视频
    ///
    /// # 参数
    /// - `steps`: 步骤列表
    /// - `out_path`: 无声视频输出路径（mp4）
    pub fn render(&self, steps: &[Step], out_path: &Path) -> Result<()> {
        let layout = build_scene(steps, &self.opts);

        info!(
            "🎬 场景排版完成: {} 个公式, {} 个解释, {} 个箭头, 共 {} 帧",
            layout.equation_count(),
            layout.explanation_count(),
            layout.arrow_count(),
            layout.total_frames
        );

        // 字体库整个渲染过程只加载一次
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        let usvg_opts = usvg::Options {
            fontdb: Arc::new(fontdb),
            ..Default::default()
        };

        let mut encoder = FfmpegEncoder::new(EncodeConfig {
            width: self.opts.width,
            height: self.opts.height,
            fps: self.opts.fps,
            out_path: out_path.to_path_buf(),
        })?;

        // 停顿期间画面不变，相同的 SVG 直接复用上一次的栅格化结果
        let mut last_svg = String::new();
        let mut last_pixels: Vec<u8> = Vec::new();

        for frame in 0..layout.total_frames {
            let svg = render_frame_svg(&layout, frame, &self.opts);

            if svg != last_svg {
                last_pixels = self.rasterize(&svg, &usvg_opts)?;
                last_svg = svg;
            }

            encoder.write_frame(&last_pixels)?;
        }

        encoder.finish()?;

        debug!("无声视频已写入: {}", out_path.display());

        Ok(())
    }

    /// 把一帧 SVG 栅格化为 RGBA 像素
    fn rasterize(&self, svg: &str, usvg_opts: &usvg::Options) -> Result<Vec<u8>> {
        let tree =
            usvg::Tree::from_data(svg.as_bytes(), usvg_opts).context("解析场景 SVG 失败")?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(self.opts.width, self.opts.height)
            .context("分配帧缓冲失败")?;

        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        // 背景完全不透明，预乘 RGBA 与 ffmpeg 期望的直通 RGBA 一致
        Ok(pixmap.data().to_vec())
    }
}
