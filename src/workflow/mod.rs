//! 流程层（Workflow Layer）
//!
//! ## 职责
//!
//! 定义"一个问题"的完整处理流程：
//!
//! ```text
//! VideoFlow (处理单个问题)
//!     ↓
//! services (能力层：explainer / narrator / muxer)
//! render   (渲染层：SceneRenderer)
//! ```
//!
//! ## 设计原则
//!
//! 1. **严格串行**：生成 → 渲染 → 配音 → 合并，没有并发
//! 2. **失败收口**：任何一步出错都在这里统一捕获，调用方只看到 None
//! 3. **作用域清理**：中间产物放在独立临时目录，成功失败都随作用域清理

pub mod pipeline;

pub use pipeline::VideoFlow;
