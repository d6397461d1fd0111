//! 应用程序错误类型
//!
//! 大部分流程内错误直接走 `anyhow::Result` 向上传递，最后在流程层统一收口；
//! 这里只定义需要区分对待的两类错误：
//! - 配置错误：在流水线启动前就要终止进程
//! - 合并错误：外部 ffmpeg 的退出状态和产物必须校验后才能宣告成功

use std::path::PathBuf;
use thiserror::Error;

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量不存在
    #[error("环境变量 {var_name} 不存在")]
    EnvVarNotFound { var_name: String },
}

/// 音视频合并错误
#[derive(Debug, Error)]
pub enum MuxError {
    /// 无法启动 ffmpeg 进程
    #[error("无法启动 ffmpeg（是否已安装并在 PATH 中？）: {source}")]
    SpawnFailed {
        #[source]
        source: std::io::Error,
    },
    /// ffmpeg 以非零状态退出
    #[error("ffmpeg 合并失败 (状态: {status}): {stderr}")]
    ExitFailure { status: String, stderr: String },
    /// 输出文件不存在
    #[error("ffmpeg 报告成功但输出文件不存在: {path}")]
    OutputMissing { path: PathBuf },
    /// 输出文件为空
    #[error("ffmpeg 报告成功但输出文件为空: {path}")]
    OutputEmpty { path: PathBuf },
}
