//! 音视频合并服务 - 业务能力层
//!
//! 只负责"把无声视频和配音合成一个文件"能力，不关心流程
//!
//! 视频流原样拷贝，音频流重编码为 AAC。
//! ffmpeg 的退出状态和输出文件都必须校验通过才算成功。

use std::path::Path;

use tokio::process::Command;
use tracing::debug;

use crate::error::MuxError;

/// 音视频合并服务
///
/// 职责：
/// - 以固定参数调用外部 ffmpeg
/// - 校验退出状态、输出文件存在且非空
pub struct Muxer;

impl Muxer {
    /// 创建新的合并服务
    pub fn new() -> Self {
        Self
    }

    /// 合并无声视频和配音
    ///
    /// # 参数
    /// - `video_path`: 无声视频路径
    /// - `audio_path`: 配音音频路径
    /// - `output_path`: 最终视频输出路径（已存在会被覆盖）
    pub async fn mux(
        &self,
        video_path: &Path,
        audio_path: &Path,
        output_path: &Path,
    ) -> Result<(), MuxError> {
        debug!(
            "合并音视频: {} + {} -> {}",
            video_path.display(),
            audio_path.display(),
            output_path.display()
        );

        let output = Command::new("ffmpeg")
            .arg("-y")
            .args(["-loglevel", "error"])
            .arg("-i")
            .arg(video_path)
            .arg("-i")
            .arg(audio_path)
            .args(["-c:v", "copy", "-c:a", "aac"])
            .arg(output_path)
            .output()
            .await
            .map_err(|source| MuxError::SpawnFailed { source })?;

        if !output.status.success() {
            return Err(MuxError::ExitFailure {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        // ffmpeg 正常退出不代表产物可用，必须落盘校验
        let metadata = tokio::fs::metadata(output_path)
            .await
            .map_err(|_| MuxError::OutputMissing {
                path: output_path.to_path_buf(),
            })?;

        if metadata.len() == 0 {
            return Err(MuxError::OutputEmpty {
                path: output_path.to_path_buf(),
            });
        }

        Ok(())
    }
}

impl Default for Muxer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试输入文件不存在时合并报错而不是假装成功
    ///
    /// 运行方式：
    /// ```bash
    /// cargo test test_mux_missing_inputs -- --ignored
    /// ```
    #[tokio::test]
    #[ignore] // 默认忽略，需要本机安装 ffmpeg
    async fn test_mux_missing_inputs_is_error() {
        let muxer = Muxer::new();
        let dir = tempfile::tempdir().unwrap();

        let result = muxer
            .mux(
                &dir.path().join("不存在的视频.mp4"),
                &dir.path().join("不存在的音频.mp3"),
                &dir.path().join("output.mp4"),
            )
            .await;

        match result {
            Err(MuxError::ExitFailure { .. }) => {}
            other => panic!("应该返回 ExitFailure，实际: {:?}", other),
        }
    }
}
