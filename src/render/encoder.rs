//! ffmpeg 帧编码器 - 渲染层
//!
//! 原始 RGBA 帧通过 stdin 管道送入外部 ffmpeg 进程，编码为 H.264 MP4。
//! 刻意使用系统 ffmpeg 而不是链接 FFmpeg 库，避免本地编译依赖。

use std::io::{Read as _, Write as _};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use anyhow::{Context, Result};

/// 编码参数
#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub out_path: PathBuf,
}

impl EncodeConfig {
    /// 校验编码参数
    ///
    /// 默认输出 yuv420p，宽高必须是偶数。
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            anyhow::bail!("编码宽高不能为 0");
        }
        if self.fps == 0 {
            anyhow::bail!("编码帧率不能为 0");
        }
        if self.width % 2 != 0 || self.height % 2 != 0 {
            anyhow::bail!("编码宽高必须是偶数（yuv420p 输出要求）");
        }
        Ok(())
    }
}

/// ffmpeg 帧编码器
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    child: Child,
    stdin: Option<ChildStdin>,
    /// stderr 由独立线程边跑边消费，管道写满不会阻塞帧循环
    stderr_reader: Option<JoinHandle<String>>,
}

impl FfmpegEncoder {
    /// 启动 ffmpeg 进程并准备接收帧
    pub fn new(cfg: EncodeConfig) -> Result<Self> {
        cfg.validate()?;

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        cmd.arg("-y")
            .args([
                "-loglevel",
                "error",
                "-f",
                "rawvideo",
                "-pix_fmt",
                "rgba",
                "-s",
                &format!("{}x{}", cfg.width, cfg.height),
                "-r",
                &cfg.fps.to_string(),
                "-i",
                "pipe:0",
                "-an",
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
                "-movflags",
                "+faststart",
            ])
            .arg(&cfg.out_path);

        let mut child = cmd
            .spawn()
            .context("无法启动 ffmpeg（是否已安装并在 PATH 中？）")?;

        let stdin = child
            .stdin
            .take()
            .context("无法打开 ffmpeg stdin")?;

        let mut stderr = child
            .stderr
            .take()
            .context("无法打开 ffmpeg stderr")?;
        let stderr_reader = std::thread::spawn(move || {
            let mut buf = String::new();
            let _ = stderr.read_to_string(&mut buf);
            buf
        });

        Ok(Self {
            cfg,
            child,
            stdin: Some(stdin),
            stderr_reader: Some(stderr_reader),
        })
    }

    /// 写入一帧原始 RGBA 数据
    pub fn write_frame(&mut self, rgba: &[u8]) -> Result<()> {
        let expected = (self.cfg.width * self.cfg.height * 4) as usize;
        if rgba.len() != expected {
            anyhow::bail!(
                "帧数据长度不符: 实际 {} 字节，期望 {} 字节",
                rgba.len(),
                expected
            );
        }

        let stdin = self
            .stdin
            .as_mut()
            .context("编码器已经结束，不能继续写帧")?;

        stdin.write_all(rgba).context("写入 ffmpeg stdin 失败")?;

        Ok(())
    }

    /// 结束编码并校验 ffmpeg 退出状态
    pub fn finish(mut self) -> Result<()> {
        drop(self.stdin.take());

        let status = self.child.wait().context("等待 ffmpeg 结束失败")?;

        let stderr = self
            .stderr_reader
            .take()
            .and_then(|reader| reader.join().ok())
            .unwrap_or_default();

        if !status.success() {
            anyhow::bail!("ffmpeg 编码失败 (状态: {}): {}", status, stderr.trim());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation_catches_bad_values() {
        let base = EncodeConfig {
            width: 1280,
            height: 720,
            fps: 30,
            out_path: PathBuf::from("scene.mp4"),
        };

        assert!(base.validate().is_ok());
        assert!(EncodeConfig { width: 0, ..base.clone() }.validate().is_err());
        assert!(EncodeConfig { height: 0, ..base.clone() }.validate().is_err());
        assert!(EncodeConfig { fps: 0, ..base.clone() }.validate().is_err());
        assert!(EncodeConfig { width: 1281, ..base.clone() }.validate().is_err());
        assert!(EncodeConfig { height: 721, ..base }.validate().is_err());
    }
}
