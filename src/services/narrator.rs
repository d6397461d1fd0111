//! 配音合成服务 - 业务能力层
//!
//! 只负责"把步骤旁白变成一个音频文件"能力，不关心流程
//!
//! 所有步骤的旁白拼成一段文本后一次性合成，不做逐步切分，
//! 也因此不保留步骤与音频片段的时间对应关系。

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::{debug, info};

use crate::config::Config;
use crate::models::{narration_script, Step};

/// 配音合成服务
///
/// 职责：
/// - 调用 ElevenLabs 风格的 TTS HTTP API
/// - 固定音色和模型（可通过配置覆盖）
/// - API 错误原样向上传递，不做重试
pub struct NarratorService {
    http: reqwest::Client,
    api_key: String,
    api_base_url: String,
    voice_id: String,
    model_id: String,
}

impl NarratorService {
    /// 创建新的配音合成服务
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.tts_api_key.clone(),
            api_base_url: config.tts_api_base_url.clone(),
            voice_id: config.tts_voice_id.clone(),
            model_id: config.tts_model_id.clone(),
        }
    }

    /// 合成整段配音并写入指定路径
    ///
    /// # 参数
    /// - `steps`: 步骤列表，旁白按原始顺序拼接
    /// - `out_path`: 音频输出路径（mp3）
    pub async fn synthesize(&self, steps: &[Step], out_path: &Path) -> Result<()> {
        let script = narration_script(steps);
        debug!(
            "合成配音，音色: {}，模型: {}，文本长度: {} 字符",
            self.voice_id,
            self.model_id,
            script.len()
        );

        let url = format!(
            "{}/v1/text-to-speech/{}",
            self.api_base_url.trim_end_matches('/'),
            self.voice_id
        );

        let body = json!({
            "text": script,
            "model_id": self.model_id,
        });

        let response = self
            .http
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .header("accept", "audio/mpeg")
            .json(&body)
            .send()
            .await
            .context("TTS API 请求失败")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("TTS API 返回错误响应 (状态: {}): {}", status, detail);
        }

        let audio = response.bytes().await.context("读取 TTS 音频数据失败")?;

        tokio::fs::write(out_path, &audio)
            .await
            .with_context(|| format!("写入音频文件失败: {}", out_path.display()))?;

        info!("✓ 配音合成完成，共 {} 字节", audio.len());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_config() -> Config {
        Config::from_vars(|name| match name {
            "OPENAI_API_KEY" => Some("sk-test".to_string()),
            "ELEVENLABS_API_KEY" => std::env::var("ELEVENLABS_API_KEY").ok(),
            _ => None,
        })
        .expect("需要 ELEVENLABS_API_KEY 环境变量")
    }

    /// 测试 TTS API 连接性
    ///
    /// 运行方式：
    /// ```bash
    /// cargo test test_synthesize_real_api -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore] // 默认忽略，需要真实的 ELEVENLABS_API_KEY
    async fn test_synthesize_real_api() {
        let service = NarratorService::new(&test_config());

        let steps = vec![Step {
            equation: "x+1=2".to_string(),
            explanation: "subtract 1".to_string(),
            narration: "We subtract one from both sides.".to_string(),
        }];

        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("narration.mp3");

        service
            .synthesize(&steps, &out_path)
            .await
            .expect("TTS 合成应该成功");

        let metadata = std::fs::metadata(&out_path).expect("音频文件应该存在");
        assert!(metadata.len() > 0, "音频文件不应该为空");
    }
}
