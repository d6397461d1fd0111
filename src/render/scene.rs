//! 场景排版 - 渲染层
//!
//! 纯排版逻辑：决定每个元素画在哪里、什么时候出场。
//! 不碰像素，不碰文件。

use crate::config::Config;
use crate::models::Step;

/// 渲染参数
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// 每个步骤讲完后的停顿时长（秒）
    pub step_pause_secs: f32,
}

impl RenderOptions {
    /// 从程序配置构造渲染参数
    pub fn from_config(config: &Config) -> Self {
        Self {
            width: config.video_width,
            height: config.video_height,
            fps: config.video_fps,
            step_pause_secs: config.step_pause_secs,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 30,
            step_pause_secs: 2.0,
        }
    }
}

/// 场景中的一个可见元素
///
/// `enter_frame` 是元素开始淡入的帧号，淡入时长统一为 `SceneLayout::fade_frames`。
#[derive(Debug, Clone, PartialEq)]
pub enum SceneElement {
    /// 步骤公式
    Equation {
        text: String,
        x: f32,
        y: f32,
        enter_frame: u32,
    },
    /// 步骤解释（放在公式右侧）
    Explanation {
        text: String,
        x: f32,
        y: f32,
        enter_frame: u32,
    },
    /// 连接当前公式和下一个位置的向下箭头
    Arrow {
        x: f32,
        y_from: f32,
        y_to: f32,
        enter_frame: u32,
    },
}

impl SceneElement {
    pub fn enter_frame(&self) -> u32 {
        match self {
            SceneElement::Equation { enter_frame, .. }
            | SceneElement::Explanation { enter_frame, .. }
            | SceneElement::Arrow { enter_frame, .. } => *enter_frame,
        }
    }
}

/// 排版完成的场景
#[derive(Debug, Clone)]
pub struct SceneLayout {
    pub elements: Vec<SceneElement>,
    /// 总帧数（至少为 1，空场景也要产出视频）
    pub total_frames: u32,
    /// 每个元素的淡入时长（帧）
    pub fade_frames: u32,
}

impl SceneLayout {
    pub fn equation_count(&self) -> usize {
        self.count(|e| matches!(e, SceneElement::Equation { .. }))
    }

    pub fn explanation_count(&self) -> usize {
        self.count(|e| matches!(e, SceneElement::Explanation { .. }))
    }

    pub fn arrow_count(&self) -> usize {
        self.count(|e| matches!(e, SceneElement::Arrow { .. }))
    }

    fn count(&self, pred: impl Fn(&SceneElement) -> bool) -> usize {
        self.elements.iter().filter(|e| pred(e)).count()
    }
}

/// 把步骤序列排版成场景
///
/// 排版策略：
/// - 第 i 个步骤的公式落在第 i 行，行高固定为画布高度的 1/8
/// - 解释文本放在公式右侧
/// - 除最后一步外，每个公式下方画一个指向下一行的箭头
/// - 元素按 公式 → 解释 → 箭头 的顺序淡入，每步之后停顿 `step_pause_secs`
pub fn build_scene(steps: &[Step], opts: &RenderOptions) -> SceneLayout {
    let w = opts.width as f32;
    let h = opts.height as f32;

    let row_height = h / 8.0;
    let top_y = row_height;
    let equation_x = w * 0.08;
    let explanation_x = w * 0.48;

    // 淡入半秒，步骤间停顿可配置
    let fade_frames = ((opts.fps as f32) * 0.5).round().max(1.0) as u32;
    let pause_frames = ((opts.fps as f32) * opts.step_pause_secs).round().max(0.0) as u32;

    let mut elements = Vec::with_capacity(steps.len() * 3);
    let mut frame = 0u32;

    for (i, step) in steps.iter().enumerate() {
        let y = top_y + row_height * i as f32;

        elements.push(SceneElement::Equation {
            text: step.equation.clone(),
            x: equation_x,
            y,
            enter_frame: frame,
        });
        frame += fade_frames;

        elements.push(SceneElement::Explanation {
            text: step.explanation.clone(),
            x: explanation_x,
            y,
            enter_frame: frame,
        });
        frame += fade_frames;

        // 最后一步不画箭头
        if i + 1 < steps.len() {
            elements.push(SceneElement::Arrow {
                x: equation_x + 24.0,
                y_from: y + row_height * 0.18,
                y_to: y + row_height * 0.82,
                enter_frame: frame,
            });
            frame += fade_frames;
        }

        // 给配音留出节奏的停顿
        frame += pause_frames;
    }

    // 收尾停顿
    frame += pause_frames;

    SceneLayout {
        elements,
        total_frames: frame.max(1),
        fade_frames,
    }
}
