use crate::error::ConfigError;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 配置 ---
    /// LLM API 密钥（必填，来自 OPENAI_API_KEY）
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    // --- TTS 配置 ---
    /// TTS API 密钥（必填，来自 ELEVENLABS_API_KEY）
    pub tts_api_key: String,
    pub tts_api_base_url: String,
    pub tts_voice_id: String,
    pub tts_model_id: String,
    // --- 渲染配置 ---
    pub video_width: u32,
    pub video_height: u32,
    pub video_fps: u32,
    /// 每个步骤讲完后的停顿时长（秒），给配音留出节奏
    pub step_pause_secs: f32,
    // --- 输出配置 ---
    /// 最终视频的输出路径
    pub output_path: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 两个 API 密钥是必填项，缺少任何一个都会在流水线启动前报错；
    /// 其余字段缺省时使用默认值。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// 从任意查找函数加载配置（便于测试）
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| ConfigError::EnvVarNotFound {
                var_name: name.to_string(),
            })
        };

        Ok(Self {
            llm_api_key: required("OPENAI_API_KEY")?,
            llm_api_base_url: lookup("LLM_API_BASE_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            llm_model_name: lookup("LLM_MODEL_NAME").unwrap_or_else(|| "gpt-4o".to_string()),
            tts_api_key: required("ELEVENLABS_API_KEY")?,
            tts_api_base_url: lookup("TTS_API_BASE_URL")
                .unwrap_or_else(|| "https://api.elevenlabs.io".to_string()),
            tts_voice_id: lookup("TTS_VOICE_ID")
                .unwrap_or_else(|| "EXAVITQu4vr4xnSDxMaL".to_string()),
            tts_model_id: lookup("TTS_MODEL_ID")
                .unwrap_or_else(|| "eleven_multilingual_v1".to_string()),
            video_width: lookup("VIDEO_WIDTH").and_then(|v| v.parse().ok()).unwrap_or(1280),
            video_height: lookup("VIDEO_HEIGHT").and_then(|v| v.parse().ok()).unwrap_or(720),
            video_fps: lookup("VIDEO_FPS").and_then(|v| v.parse().ok()).unwrap_or(30),
            step_pause_secs: lookup("STEP_PAUSE_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(2.0),
            output_path: lookup("OUTPUT_PATH")
                .unwrap_or_else(|| "final_explanation.mp4".to_string()),
            verbose_logging: lookup("VERBOSE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        })
    }
}
