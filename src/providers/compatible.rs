use async_trait::async_trait;
use color_eyre::eyre::{Context, Result};
use serde::Deserialize;

use crate::config::TranslationConfig;

use super::traits::{ChatMessage, ChatResponse, Provider};

/// OpenAI 兼容协议 Provider（OpenAI/DeepSeek/GLM 等）
pub struct CompatibleProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CompatibleProvider {
    pub fn new(config: &TranslationConfig, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// 构造请求 URL
    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// 构造请求体
    fn build_body(messages: &[ChatMessage], model: &str, temperature: f64) -> serde_json::Value {
        serde_json::json!({
            "model": model,
            "messages": messages
                .iter()
                .map(|m| serde_json::json!({ "role": m.role, "content": m.content }))
                .collect::<Vec<_>>(),
            "temperature": temperature,
        })
    }

    /// 解析 OpenAI 响应，只取第一个 choice
    fn parse_response(body: &OpenAIResponse) -> ChatResponse {
        let text = body
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone());
        ChatResponse { text }
    }
}

#[async_trait]
impl Provider for CompatibleProvider {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        model: &str,
        temperature: f64,
    ) -> Result<ChatResponse> {
        let body = Self::build_body(messages, model, temperature);

        let resp = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .wrap_err("发送请求失败")?;

        let status = resp.status();
        let resp_text = resp.text().await.wrap_err("读取响应失败")?;

        if !status.is_success() {
            return Err(color_eyre::eyre::eyre!(
                "API 请求失败 ({}): {}",
                status,
                resp_text
            ));
        }

        let parsed: OpenAIResponse =
            serde_json::from_str(&resp_text).wrap_err("解析响应 JSON 失败")?;

        Ok(Self::parse_response(&parsed))
    }
}

// --- OpenAI 响应结构体（仅用于反序列化）---

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}
