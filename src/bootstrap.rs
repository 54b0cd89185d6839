//! 启动流程
//!
//! `NotStarted → Validating → Aborted | Connected`
//!
//! 凭据校验在读取配置、创建任何客户端之前完成：缺少任一环境变量时直接返回 `Aborted`，
//! 不读写 config.toml、不创建 HTTP 客户端、不注册事件处理器、不连接 Gateway。

use std::sync::Arc;

use color_eyre::eyre::Result;

use crate::channels::Relay;
use crate::config::{Config, CredentialError, Credentials};
use crate::providers::create_provider;
use crate::translate::Translator;

/// 校验后的启动结果
pub enum Startup {
    /// 凭据缺失，不启动
    Aborted(CredentialError),
    /// 可以连接
    Ready {
        discord_token: String,
        relay: Arc<Relay>,
    },
}

/// 先校验凭据，通过后才调用 `load_config` 读取配置并组装消息处理器
pub fn start<F>(credentials: Result<Credentials, CredentialError>, load_config: F) -> Result<Startup>
where
    F: FnOnce() -> Result<Config>,
{
    if let Err(e) = credentials {
        return Ok(Startup::Aborted(e));
    }

    let config = load_config()?;
    Ok(prepare(&config, credentials))
}

/// 校验凭据并组装消息处理器
pub fn prepare(config: &Config, credentials: Result<Credentials, CredentialError>) -> Startup {
    let credentials = match credentials {
        Ok(c) => c,
        Err(e) => return Startup::Aborted(e),
    };

    let provider = create_provider(&config.translation, &credentials.openai_api_key);
    let translator = Translator::from_config(Arc::from(provider), &config.translation);
    let relay = Relay::from_config(&config.discord, translator);

    Startup::Ready {
        discord_token: credentials.discord_token,
        relay: Arc::new(relay),
    }
}
