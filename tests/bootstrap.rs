//! 启动流程测试：凭据缺失时不进入连接阶段

use std::cell::Cell;

use koala::bootstrap::{prepare, start, Startup};
use color_eyre::eyre::Result;
use koala::config::{Config, CredentialError, Credentials};

fn lookup(
    discord: Option<&'static str>,
    openai: Option<&'static str>,
) -> impl Fn(&str) -> Option<String> {
    move |name| match name {
        "DISCORD_TOKEN" => discord.map(String::from),
        "OPENAI_API_KEY" => openai.map(String::from),
        _ => None,
    }
}

#[test]
fn missing_openai_key_aborts_before_connecting() {
    let startup = prepare(
        &Config::default(),
        Credentials::from_lookup(lookup(Some("discord"), None)),
    );

    match startup {
        Startup::Aborted(CredentialError::Missing(name)) => assert_eq!(name, "OPENAI_API_KEY"),
        Startup::Ready { .. } => panic!("缺少 OPENAI_API_KEY 时不应启动"),
    }
}

#[test]
fn missing_discord_token_aborts_before_connecting() {
    let startup = prepare(
        &Config::default(),
        Credentials::from_lookup(lookup(None, Some("sk-test"))),
    );

    assert!(matches!(
        startup,
        Startup::Aborted(CredentialError::Missing("DISCORD_TOKEN"))
    ));
}

#[test]
fn both_credentials_reach_ready() {
    let startup = prepare(
        &Config::default(),
        Credentials::from_lookup(lookup(Some("discord"), Some("sk-test"))),
    );

    match startup {
        Startup::Ready {
            discord_token,
            relay,
        } => {
            assert_eq!(discord_token, "discord");
            assert!(!relay.gate().is_restricted());
        }
        Startup::Aborted(e) => panic!("不应中止: {}", e),
    }
}

// ─── 凭据校验先于读取配置 ────────────────────────────────────────────────────

fn started(result: Result<Startup>) -> Startup {
    match result {
        Ok(startup) => startup,
        Err(e) => panic!("start 不应返回错误: {:#}", e),
    }
}

#[test]
fn missing_credential_aborts_even_with_malformed_config() {
    let tmp = tempfile::tempdir().unwrap();
    let config_path = tmp.path().join("config.toml");
    std::fs::write(&config_path, "translation = 5\n").unwrap();
    let loads = Cell::new(0);

    // 凭据缺失应走中止分支，而不是配置解析错误
    let startup = started(start(
        Credentials::from_lookup(lookup(Some("discord"), None)),
        || {
            loads.set(loads.get() + 1);
            Config::load_from_path(&config_path)
        },
    ));

    assert!(matches!(
        startup,
        Startup::Aborted(CredentialError::Missing("OPENAI_API_KEY"))
    ));
    assert_eq!(loads.get(), 0, "中止时不应读取配置");
}

#[test]
fn aborted_start_writes_no_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    let config_path = tmp.path().join(".koala").join("config.toml");

    let startup = started(start(Credentials::from_lookup(lookup(None, None)), || {
        std::fs::create_dir_all(config_path.parent().unwrap())?;
        std::fs::write(&config_path, "")?;
        Config::load_from_path(&config_path)
    }));

    assert!(matches!(
        startup,
        Startup::Aborted(CredentialError::Missing("DISCORD_TOKEN"))
    ));
    assert!(!config_path.exists());
}

#[test]
fn malformed_config_is_an_error_once_credentials_pass() {
    let tmp = tempfile::tempdir().unwrap();
    let config_path = tmp.path().join("config.toml");
    std::fs::write(&config_path, "translation = 5\n").unwrap();

    let result = start(
        Credentials::from_lookup(lookup(Some("discord"), Some("sk-test"))),
        || Config::load_from_path(&config_path),
    );

    assert!(result.is_err());
}

#[test]
fn start_loads_config_after_credentials_pass() {
    let tmp = tempfile::tempdir().unwrap();
    let config_path = tmp.path().join("config.toml");
    std::fs::write(&config_path, "[discord]\nallowed_channel_ids = [7]\n").unwrap();

    let startup = started(start(
        Credentials::from_lookup(lookup(Some("discord"), Some("sk-test"))),
        || Config::load_from_path(&config_path),
    ));

    match startup {
        Startup::Ready { relay, .. } => {
            assert!(relay.gate().permits(7));
            assert!(!relay.gate().permits(8));
        }
        Startup::Aborted(e) => panic!("不应中止: {}", e),
    }
}
