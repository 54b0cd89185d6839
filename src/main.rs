use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::prelude::*;

#[cfg(feature = "discord")]
use koala::bootstrap::{start, Startup};
#[cfg(feature = "discord")]
use koala::config::Credentials;
use koala::config::{credentials, Config};

#[derive(Parser)]
#[command(name = "koala", about = "Discord 日韩自动翻译 Bot", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 启动 Discord Bot（默认）
    #[cfg(feature = "discord")]
    Run,
    /// 翻译一段文本后退出（只需要 OPENAI_API_KEY）
    Translate {
        /// 待翻译文本
        text: String,
    },
    /// 初始化配置文件
    Init,
    /// 显示当前配置
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let cli = Cli::parse();

    match cli.command {
        #[cfg(feature = "discord")]
        None | Some(Commands::Run) => run_bot().await?,
        #[cfg(not(feature = "discord"))]
        None => {
            println!("未启用 discord feature，可用命令见 `koala --help`");
        }
        Some(Commands::Translate { text }) => run_translate(&text).await?,
        Some(Commands::Init) => run_init()?,
        Some(Commands::Config) => run_config()?,
    }

    Ok(())
}

#[cfg(feature = "discord")]
async fn run_bot() -> Result<()> {
    let startup = start(Credentials::from_env(), || {
        Config::load_or_init().wrap_err("加载配置失败")
    })?;

    match startup {
        Startup::Aborted(e) => {
            // 未启动不算崩溃，正常退出
            tracing::error!("{}", e);
            Ok(())
        }
        Startup::Ready {
            discord_token,
            relay,
        } => koala::channels::discord::run_discord(&discord_token, relay).await,
    }
}

async fn run_translate(text: &str) -> Result<()> {
    let config = Config::load_or_init().wrap_err("加载配置失败")?;

    let api_key = match credentials::openai_api_key_from_env() {
        Ok(key) => key,
        Err(e) => {
            tracing::error!("{}", e);
            return Ok(());
        }
    };

    let text = text.trim();
    let script = koala::detect::classify(text);
    if !script.is_translatable() {
        println!("既不是日语也不是韩语，不翻译。");
        return Ok(());
    }

    let provider = koala::providers::create_provider(&config.translation, &api_key);
    let translator =
        koala::translate::Translator::from_config(Arc::from(provider), &config.translation);
    let translated = translator.translate(text, script).await;

    println!("{}\n{}", config.discord.reply_prefix, translated);

    Ok(())
}

fn run_init() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        println!("配置文件已存在: {}", config_path.display());
        println!("如需重新初始化，请先删除该文件。");
    } else {
        let _ = Config::load_or_init()?;
        println!("已创建配置文件: {}", config_path.display());
        println!("请设置环境变量 DISCORD_TOKEN 和 OPENAI_API_KEY。");
    }

    Ok(())
}

fn run_config() -> Result<()> {
    let config_path = Config::config_path()?;

    if !config_path.exists() {
        println!("配置文件不存在。运行 `koala init` 创建。");
        return Ok(());
    }

    let content = std::fs::read_to_string(&config_path).wrap_err("读取配置文件失败")?;
    println!("配置文件: {}\n", config_path.display());
    println!("{}", content);

    Ok(())
}

/// 初始化 tracing: stderr 输出 info+，日志文件输出 debug+
fn init_tracing() -> Result<()> {
    let log_dir = koala::config::log_dir()?;
    std::fs::create_dir_all(&log_dir)
        .wrap_err_with(|| format!("创建日志目录失败: {}", log_dir.display()))?;

    // 文件日志: 按天滚动，debug 级别
    let file_appender = tracing_appender::rolling::daily(&log_dir, "koala.log");
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("koala=debug")),
        );

    // stderr: 本 crate info+，依赖只输出 warn+
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(tracing_subscriber::EnvFilter::new("koala=info,warn"));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}
