//! 渲染层（Render Layer）
//!
//! ## 职责
//!
//! 把步骤序列变成一个无声 MP4，分三个阶段：
//!
//! ### `scene` - 纯排版
//! - 公式在左、解释在右，逐步下移
//! - 相邻步骤之间画一个向下的箭头（最后一步没有）
//! - 每个元素淡入出场，每个步骤讲完后停顿固定时长
//!
//! ### `svg` - 逐帧合成
//! - 每一帧是一个 SVG 文档，元素透明度由淡入进度决定
//!
//! ### `encoder` / `renderer` - 栅格化与编码
//! - usvg/resvg 用系统字体栅格化
//! - 原始 RGBA 帧通过管道送入外部 ffmpeg 编码
//!
//! ## 设计原则
//!
//! 排版结果（元素数量、出场时刻）与栅格化完全解耦，排版可以独立测试。

pub mod encoder;
pub mod renderer;
pub mod scene;
pub mod svg;

pub use renderer::SceneRenderer;
pub use scene::{build_scene, RenderOptions, SceneElement, SceneLayout};
