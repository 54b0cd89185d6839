//! 集成测试公共辅助函数

// 每个集成测试文件只使用 common 的一部分，未用到的辅助函数属于预期 dead_code
#![allow(dead_code)]

pub mod mock_provider;
pub use mock_provider::{MockProvider, MockReply};

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use color_eyre::eyre::{eyre, Result};

use koala::channels::{ChannelGate, ReplySink, Relay};
use koala::translate::Translator;

/// 测试用回复前缀
pub const PREFIX: &str = "🐨 自動翻訳:";

/// 记录所有回复的 ReplySink
///
/// - `failing()` 模拟权限不足等发送失败
/// - `failing_after(n)` 前 n 次发送成功，之后全部失败
#[derive(Default)]
pub struct MockSink {
    sent: Mutex<Vec<String>>,
    attempts: Mutex<usize>,
    fail_from: Option<usize>,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self::failing_after(0)
    }

    pub fn failing_after(successes: usize) -> Self {
        Self {
            fail_from: Some(successes),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().expect("MockSink mutex 中毒").clone()
    }

    /// 包括失败在内的发送次数
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().expect("MockSink mutex 中毒")
    }
}

#[async_trait]
impl ReplySink for MockSink {
    async fn reply(&self, text: &str) -> Result<()> {
        let attempt = {
            let mut attempts = self.attempts.lock().expect("MockSink mutex 中毒");
            *attempts += 1;
            *attempts - 1
        };
        if self.fail_from.is_some_and(|n| attempt >= n) {
            return Err(eyre!("403 Missing Permissions"));
        }
        self.sent
            .lock()
            .expect("MockSink mutex 中毒")
            .push(text.to_string());
        Ok(())
    }
}

/// 用 MockProvider 构造 Relay
pub fn test_relay(provider: Arc<MockProvider>, allowed: Vec<u64>) -> Relay {
    let translator = Translator::new(provider, "test-model", 0.1);
    Relay::new(ChannelGate::new(allowed), translator, PREFIX)
}
