pub mod credentials;
pub mod schema;

pub use credentials::{CredentialError, Credentials, DISCORD_TOKEN_ENV, OPENAI_API_KEY_ENV};
pub use schema::{home_dir, log_dir, Config, DiscordConfig, TranslationConfig};
