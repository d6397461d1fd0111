//! # Math Explainer
//!
//! 一个把数学问题变成带配音讲解视频的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程顺序
//! - `ExplainerService` - 调用 LLM 生成分步讲解（JSON 契约）
//! - `NarratorService` - 调用 TTS API 合成整段配音
//! - `Muxer` - 调用外部 ffmpeg 合并音视频
//!
//! ### ② 渲染层（Render）
//! - `render/` - 把步骤序列排版成场景并编码为无声视频
//! - `scene` - 纯排版：N 个公式、N 个解释、N-1 个箭头
//! - `svg` / `renderer` - 逐帧合成 SVG 并栅格化
//! - `encoder` - 原始帧管道送入 ffmpeg 编码
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个问题"的完整处理流程
//! - `VideoFlow` - 流程编排（生成 → 渲染 → 配音 → 合并）
//!
//! ### ④ 应用层（App）
//! - `app` - 命令行交互：读取问题、输出结果路径
//!
//! ## 设计原则
//!
//! 1. **向下依赖**：app → workflow → services / render
//! 2. **失败收口**：任何一步出错都在流程层统一捕获，调用方只看到 None
//! 3. **作用域清理**：中间产物放在每次运行独立的临时目录里，成功失败都会清理

pub mod app;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod render;
pub mod services;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{ConfigError, MuxError};
pub use models::{narration_script, Step, StepSequence};
pub use render::SceneRenderer;
pub use workflow::VideoFlow;
