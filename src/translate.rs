//! 日韩互译
//!
//! 按检测到的文字方向选择 system prompt，调用 Provider 取回译文。
//! Provider 的任何失败都在这里收口：记录日志并返回固定的错误提示文本，
//! 不向消息处理层抛错。

use std::sync::Arc;

use color_eyre::eyre::{eyre, Result};
use tracing::{debug, warn};

use crate::config::TranslationConfig;
use crate::detect::Script;
use crate::providers::{ChatMessage, Provider};

/// 翻译失败时代替译文返回的提示
pub const TRANSLATION_ERROR_REPLY: &str = "(翻訳中にエラーが発生しました)";

const JA_TO_KO_PROMPT: &str = "You are a professional Japanese-to-Korean translator.\n\
Translate the user's Japanese text into natural, conversational Korean.\n\
Keep the tone and nuance of the original. Do not add explanations, notes or quotes.\n\
Respond with ONLY the Korean translation.";

const KO_TO_JA_PROMPT: &str = "You are a professional Korean-to-Japanese translator.\n\
Translate the user's Korean text into natural, conversational Japanese.\n\
Keep the tone and nuance of the original. Do not add explanations, notes or quotes.\n\
Respond with ONLY the Japanese translation.";

/// 翻译方向对应的 system prompt；`Other` 不需要翻译
pub fn system_prompt(script: Script) -> Option<&'static str> {
    match script {
        Script::Japanese => Some(JA_TO_KO_PROMPT),
        Script::Korean => Some(KO_TO_JA_PROMPT),
        Script::Other => None,
    }
}

/// 翻译调度器
pub struct Translator {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f64,
}

impl Translator {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, temperature: f64) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
        }
    }

    pub fn from_config(provider: Arc<dyn Provider>, config: &TranslationConfig) -> Self {
        Self::new(provider, config.model.clone(), config.temperature)
    }

    /// 翻译文本。`Other` 原样返回且不调用 Provider；失败返回 [`TRANSLATION_ERROR_REPLY`]
    pub async fn translate(&self, text: &str, script: Script) -> String {
        let Some(prompt) = system_prompt(script) else {
            return text.to_string();
        };

        match self.request(prompt, text).await {
            Ok(translated) => {
                debug!("翻译完成 [{}]: {} 字符", script.as_str(), translated.chars().count());
                translated
            }
            Err(e) => {
                warn!("翻訳APIエラー: {:#}", e);
                TRANSLATION_ERROR_REPLY.to_string()
            }
        }
    }

    async fn request(&self, prompt: &str, text: &str) -> Result<String> {
        let messages = [ChatMessage::system(prompt), ChatMessage::user(text)];
        let response = self
            .provider
            .chat(&messages, &self.model, self.temperature)
            .await?;
        response
            .text
            .map(|t| t.trim().to_string())
            .ok_or_else(|| eyre!("响应中没有译文"))
    }
}
