use std::path::PathBuf;

use color_eyre::eyre::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// 全局配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub discord: DiscordConfig,
}

/// 翻译 Provider 配置（API Key 只从环境变量读取，不落盘）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// 低温度，尽量稳定输出
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f64 {
    0.1
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
        }
    }
}

/// Discord Bot 配置（Token 只从环境变量读取）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// 执行翻译的频道 ID 列表（空 = 所有频道）
    #[serde(default)]
    pub allowed_channel_ids: Vec<u64>,
    /// 回复前缀
    #[serde(default = "default_reply_prefix")]
    pub reply_prefix: String,
}

fn default_reply_prefix() -> String {
    "🐨 自動翻訳:".to_string()
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            allowed_channel_ids: vec![],
            reply_prefix: default_reply_prefix(),
        }
    }
}

/// 默认配置 TOML 模板
pub(crate) const DEFAULT_CONFIG_TOML: &str = r#"# DISCORD_TOKEN 和 OPENAI_API_KEY 必须通过环境变量提供

[translation]
base_url = "https://api.openai.com/v1"
model = "gpt-4o"
temperature = 0.1

[discord]
# 只在这些频道翻译，留空 = 所有频道
allowed_channel_ids = []
# allowed_channel_ids = [1439316912646389822, 1423699794781536377]
reply_prefix = "🐨 自動翻訳:"
"#;

impl Config {
    /// 返回配置文件路径: `~/.koala/config.toml`
    pub fn config_path() -> Result<PathBuf> {
        Ok(home_dir()?.join("config.toml"))
    }

    /// 加载配置，如果配置文件不存在则创建默认配置
    pub fn load_or_init() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent).wrap_err("创建配置目录失败")?;
            }
            std::fs::write(&config_path, DEFAULT_CONFIG_TOML).wrap_err("写入默认配置失败")?;
        }

        Self::load_from_path(&config_path)
    }

    /// 从指定路径加载配置（figment 多层合并：默认值 → TOML → KOALA_ 环境变量）
    pub fn load_from_path(path: &std::path::Path) -> Result<Self> {
        let config: Config = Self::figment(path)
            .extract()
            .wrap_err("解析配置文件失败")?;

        Ok(config)
    }

    fn figment(path: &std::path::Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("KOALA_").split("__"))
    }
}

/// 数据根目录: `~/.koala/`
pub fn home_dir() -> Result<PathBuf> {
    let base_dirs = directories::BaseDirs::new()
        .ok_or_else(|| color_eyre::eyre::eyre!("无法获取 home 目录"))?;
    Ok(base_dirs.home_dir().join(".koala"))
}

/// 日志目录: `~/.koala/logs/`
pub fn log_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join("logs"))
}
