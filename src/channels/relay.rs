//! 频道过滤 + 消息处理
//!
//! 每条入站消息走一遍短路检查，最多产生一次翻译请求和一条回复：
//!   1. Bot 发言（包括自己）→ 丢弃
//!   2. 不在白名单频道 → 丢弃
//!   3. 去掉首尾空白后为空 → 丢弃
//!   4. 既不是日语也不是韩语 → 丢弃
//!   5. 翻译
//!   6. 译文为空 → 丢弃
//!   7. 加前缀回复，发送失败只记日志
//!
//! 处理过程不返回错误，一条消息的失败不影响后续消息。

use tracing::{debug, info, warn};

use crate::config::DiscordConfig;
use crate::detect::{classify, Script};
use crate::translate::Translator;

use super::{InboundMessage, ReplySink};

/// Discord 单条消息字符上限
pub const MAX_REPLY_CHARS: usize = 2000;

/// 频道白名单，启动后只读
#[derive(Debug, Clone, Default)]
pub struct ChannelGate {
    allowed: Vec<u64>,
}

impl ChannelGate {
    /// 空列表 = 不限制
    pub fn new(allowed: Vec<u64>) -> Self {
        Self { allowed }
    }

    pub fn permits(&self, channel_id: u64) -> bool {
        self.allowed.is_empty() || self.allowed.contains(&channel_id)
    }

    pub fn is_restricted(&self) -> bool {
        !self.allowed.is_empty()
    }
}

/// 单条消息的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    FromBot,
    ChannelNotAllowed,
    EmptyText,
    NotTranslatable,
    EmptyTranslation,
    /// 已回复（分段数）
    Replied { chunks: usize },
    /// 回复发送失败
    ReplyFailed,
}

/// 入站消息处理器
pub struct Relay {
    gate: ChannelGate,
    translator: Translator,
    reply_prefix: String,
}

impl Relay {
    pub fn new(gate: ChannelGate, translator: Translator, reply_prefix: impl Into<String>) -> Self {
        Self {
            gate,
            translator,
            reply_prefix: reply_prefix.into(),
        }
    }

    pub fn from_config(config: &DiscordConfig, translator: Translator) -> Self {
        Self::new(
            ChannelGate::new(config.allowed_channel_ids.clone()),
            translator,
            config.reply_prefix.clone(),
        )
    }

    pub fn gate(&self) -> &ChannelGate {
        &self.gate
    }

    /// 拼接回复正文
    pub fn format_reply(&self, translated: &str) -> String {
        format!("{}\n{}", self.reply_prefix, translated)
    }

    /// 处理一条入站消息
    pub async fn handle(&self, msg: &InboundMessage, sink: &dyn ReplySink) -> Disposition {
        if msg.author_is_bot {
            debug!("跳过 Bot 消息 [channel={}]", msg.channel_id);
            return Disposition::FromBot;
        }

        if !self.gate.permits(msg.channel_id) {
            debug!("跳过非白名单频道: {}", msg.channel_id);
            return Disposition::ChannelNotAllowed;
        }

        let text = msg.content.trim();
        if text.is_empty() {
            debug!("空消息，跳过 [channel={}]", msg.channel_id);
            return Disposition::EmptyText;
        }

        let script = classify(text);
        if script == Script::Other {
            debug!("非日韩文本，跳过 [channel={}]", msg.channel_id);
            return Disposition::NotTranslatable;
        }

        info!(
            "收到待翻译消息 [channel={}, lang={}]: {} 字符",
            msg.channel_id,
            script.as_str(),
            text.chars().count()
        );

        let translated = self.translator.translate(text, script).await;
        if translated.is_empty() {
            debug!("译文为空，不回复 [channel={}]", msg.channel_id);
            return Disposition::EmptyTranslation;
        }

        let reply = self.format_reply(&translated);
        let chunks = split_message(&reply, MAX_REPLY_CHARS);
        for chunk in &chunks {
            if let Err(e) = sink.reply(chunk).await {
                warn!("送信エラー [channel={}]: {:#}", msg.channel_id, e);
                return Disposition::ReplyFailed;
            }
        }

        Disposition::Replied {
            chunks: chunks.len(),
        }
    }
}

/// 按字符数分段（不会切断 UTF-8 字符）
pub fn split_message(text: &str, max_chars: usize) -> Vec<&str> {
    if max_chars == 0 || text.chars().count() <= max_chars {
        return vec![text];
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == max_chars {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    chunks.push(&text[start..]);

    chunks
}
