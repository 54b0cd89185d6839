use std::sync::Arc;

use async_trait::async_trait;
use color_eyre::eyre::{Context as _, Result};
use serenity::all::{
    Context, CreateAllowedMentions, CreateMessage, EventHandler, GatewayIntents, Message, Ready,
};
use serenity::Client;
use tracing::{debug, info, warn};

use super::relay::{Disposition, Relay};
use super::{InboundMessage, ReplySink};

/// 读取消息正文需要 MESSAGE_CONTENT 特权 intent（需在 Developer Portal 打开）
fn intents() -> GatewayIntents {
    GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
}

/// 以回复形式发到原消息所在频道，不 @ 原作者，也不解析正文里的任何提及
struct DiscordReply<'a> {
    ctx: &'a Context,
    msg: &'a Message,
}

#[async_trait]
impl<'a> ReplySink for DiscordReply<'a> {
    async fn reply(&self, text: &str) -> Result<()> {
        let builder = CreateMessage::new()
            .content(text)
            .reference_message(self.msg)
            .allowed_mentions(CreateAllowedMentions::new().replied_user(false));

        self.msg
            .channel_id
            .send_message(&self.ctx.http, builder)
            .await
            .wrap_err("发送 Discord 回复失败")?;
        Ok(())
    }
}

fn to_inbound(msg: &Message) -> InboundMessage {
    InboundMessage {
        author_is_bot: msg.author.bot,
        channel_id: msg.channel_id.get(),
        content: msg.content.clone(),
    }
}

/// serenity 事件处理器
pub struct DiscordHandler {
    relay: Arc<Relay>,
}

impl DiscordHandler {
    pub fn new(relay: Arc<Relay>) -> Self {
        Self { relay }
    }
}

#[async_trait]
impl EventHandler for DiscordHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("ログイン成功: {} (ID: {})", ready.user.name, ready.user.id);
        if self.relay.gate().is_restricted() {
            info!("仅翻译白名单频道");
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let inbound = to_inbound(&msg);
        let sink = DiscordReply {
            ctx: &ctx,
            msg: &msg,
        };

        match self.relay.handle(&inbound, &sink).await {
            Disposition::Replied { chunks } => {
                debug!("已回复 [message={}, chunks={}]", msg.id, chunks);
            }
            Disposition::ReplyFailed => {
                warn!("回复未送达 [message={}]", msg.id);
            }
            _ => {}
        }
    }
}

/// 连接 Discord Gateway 并阻塞直到连接结束（Ctrl-C 时主动断开）
pub async fn run_discord(token: &str, relay: Arc<Relay>) -> Result<()> {
    let mut client = Client::builder(token, intents())
        .event_handler(DiscordHandler::new(relay))
        .await
        .wrap_err("创建 Discord 客户端失败")?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("收到 Ctrl-C，断开 Discord 连接");
            shard_manager.shutdown_all().await;
        }
    });

    info!("Discord Bot 启动中...");
    client.start().await.wrap_err("Discord 连接异常结束")?;

    Ok(())
}
