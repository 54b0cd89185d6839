// 每个集成测试文件只使用 MockProvider 的部分方法，dead_code 为预期行为
#![allow(dead_code)]

//! 测试专用 MockProvider
//!
//! 实现 Provider trait，预置响应队列（VecDeque），
//! 每次 chat 调用从队列头部弹出一个结果，并记录收到的 messages。
//!
//! - 队列空时返回 Err，便于检测意外的额外翻译请求
//! - `MockReply::Fail` 模拟网络错误 / 配额错误

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use color_eyre::eyre::{eyre, Result};

use koala::providers::{ChatMessage, ChatResponse, Provider};

/// 预设的单次响应
pub enum MockReply {
    Text(String),
    Fail(String),
}

/// 可插拔 Mock Provider，按队列顺序返回预设响应
pub struct MockProvider {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockProvider {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(vec![]),
        }
    }

    /// 没有任何预设响应：任何调用都算意外
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn text(content: &str) -> MockReply {
        MockReply::Text(content.to_string())
    }

    pub fn fail(reason: &str) -> MockReply {
        MockReply::Fail(reason.to_string())
    }

    /// 已收到的请求数
    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("MockProvider mutex 中毒").len()
    }

    /// 第 n 次请求的 system prompt
    pub fn system_prompt(&self, n: usize) -> Option<String> {
        let requests = self.requests.lock().expect("MockProvider mutex 中毒");
        requests
            .get(n)
            .and_then(|msgs| msgs.iter().find(|m| m.role == "system"))
            .map(|m| m.content.clone())
    }

    /// 第 n 次请求的 user 内容
    pub fn user_text(&self, n: usize) -> Option<String> {
        let requests = self.requests.lock().expect("MockProvider mutex 中毒");
        requests
            .get(n)
            .and_then(|msgs| msgs.iter().find(|m| m.role == "user"))
            .map(|m| m.content.clone())
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        _model: &str,
        _temperature: f64,
    ) -> Result<ChatResponse> {
        self.requests
            .lock()
            .expect("MockProvider mutex 中毒")
            .push(messages.to_vec());

        let next = self
            .replies
            .lock()
            .expect("MockProvider mutex 中毒")
            .pop_front();
        match next {
            Some(MockReply::Text(text)) => Ok(ChatResponse { text: Some(text) }),
            Some(MockReply::Fail(reason)) => Err(eyre!(reason)),
            None => Err(eyre!("MockProvider 响应队列已空：意外的额外翻译请求")),
        }
    }
}
