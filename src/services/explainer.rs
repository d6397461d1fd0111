//! 讲解生成服务 - 业务能力层
//!
//! 只负责"把问题变成步骤序列"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务

use anyhow::{Context, Result};
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::Step;

/// 讲解生成服务
///
/// 职责：
/// - 调用 LLM API 生成分步讲解
/// - 按 JSON 契约解析出 `Vec<Step>`
/// - 不做重试，解析失败原样向上传递
pub struct ExplainerService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl ExplainerService {
    /// 创建新的讲解生成服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
        }
    }

    /// 生成分步讲解
    ///
    /// # 参数
    /// - `question`: 用户输入的数学问题
    ///
    /// # 返回
    /// 返回有序的步骤列表，顺序即讲解顺序
    pub async fn generate(&self, question: &str) -> Result<Vec<Step>> {
        debug!("调用 LLM API，模型: {}", self.model_name);

        let system_message = ChatCompletionRequestSystemMessageArgs::default()
            .content("你是一位耐心的数学老师，擅长把解题过程拆解成清晰的步骤。")
            .build()?;

        let user_message = ChatCompletionRequestUserMessageArgs::default()
            .content(build_prompt(question))
            .build()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![
                ChatCompletionRequestMessage::System(system_message),
                ChatCompletionRequestMessage::User(user_message),
            ])
            .temperature(0.3)
            .max_tokens(2048u32)
            .build()?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            anyhow::anyhow!("LLM API 调用失败: {}", e)
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("LLM 返回内容为空"))?;

        debug!("LLM API 调用成功，响应长度: {} 字符", content.len());

        parse_steps(&content)
    }
}

/// 构建讲解提示词
fn build_prompt(question: &str) -> String {
    format!(
        r#"请逐步讲解下面这道数学题：
{}

请以 JSON 数组格式回答，数组中的每个步骤包含以下字段：
1. equation: 该步骤的数学公式
2. explanation: 对该步骤的文字解释
3. narration: 该步骤的配音旁白文本

只返回 JSON 数组本身，不要返回任何其他内容。"#,
        question
    )
}

/// 按契约解析 LLM 响应
///
/// 模型偶尔会在 JSON 外面包一层 Markdown 代码块或说明文字，
/// 这里只截取最外层的数组再严格解析；字段缺失或格式错误原样报错。
fn parse_steps(content: &str) -> Result<Vec<Step>> {
    let json = extract_json_array(content);
    serde_json::from_str::<Vec<Step>>(json).context("LLM 响应不符合步骤 JSON 契约")
}

/// 截取响应中最外层的 JSON 数组
///
/// 找不到数组时返回原文，让后续解析自然报错。
fn extract_json_array(content: &str) -> &str {
    match (content.find('['), content.rfind(']')) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => content,
    }
}
