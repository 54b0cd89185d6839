//! 启动凭据
//!
//! 两个密钥只从环境变量读取，没有默认值，也不写进 config.toml。

use thiserror::Error;

/// Discord Bot Token 环境变量名
pub const DISCORD_TOKEN_ENV: &str = "DISCORD_TOKEN";
/// 翻译 API Key 环境变量名
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// 凭据缺失
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("環境変数 {0} が設定されていません")]
    Missing(&'static str),
}

/// 启动所需的两个凭据
#[derive(Clone)]
pub struct Credentials {
    pub discord_token: String,
    pub openai_api_key: String,
}

// 不在日志里泄露密钥
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("discord_token", &"***")
            .field("openai_api_key", &"***")
            .finish()
    }
}

impl Credentials {
    /// 从进程环境变量读取
    pub fn from_env() -> Result<Self, CredentialError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 从任意查找函数读取，先检查 DISCORD_TOKEN 再检查 OPENAI_API_KEY
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CredentialError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = require(&lookup, DISCORD_TOKEN_ENV)?;
        let openai_api_key = require(&lookup, OPENAI_API_KEY_ENV)?;
        Ok(Self {
            discord_token,
            openai_api_key,
        })
    }
}

/// 只读取翻译 API Key（`koala translate` 单次模式不需要 Discord）
pub fn openai_api_key_from_env() -> Result<String, CredentialError> {
    require(&|name: &str| std::env::var(name).ok(), OPENAI_API_KEY_ENV)
}

/// 空字符串按缺失处理
fn require<F>(lookup: &F, name: &'static str) -> Result<String, CredentialError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(CredentialError::Missing(name)),
    }
}
