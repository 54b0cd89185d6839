#[cfg(feature = "discord")]
pub mod discord;
pub mod relay;

use async_trait::async_trait;
use color_eyre::eyre::Result;

pub use relay::{split_message, ChannelGate, Disposition, Relay, MAX_REPLY_CHARS};

/// 通道消息（与具体聊天平台无关）
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    /// 作者是否为 Bot（包括自己）
    pub author_is_bot: bool,
    pub channel_id: u64,
    pub content: String,
}

impl InboundMessage {
    /// 普通用户发送的消息
    pub fn from_user(channel_id: u64, content: impl Into<String>) -> Self {
        Self {
            author_is_bot: false,
            channel_id,
            content: content.into(),
        }
    }
}

/// 回复投递抽象：把文本作为对原消息的回复发出，不 @ 原作者
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn reply(&self, text: &str) -> Result<()>;
}
