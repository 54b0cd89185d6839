pub mod compatible;
pub mod traits;

pub use compatible::CompatibleProvider;
pub use traits::{ChatMessage, ChatResponse, Provider};

use crate::config::TranslationConfig;

/// 根据配置创建 Provider 实例
pub fn create_provider(config: &TranslationConfig, api_key: &str) -> Box<dyn Provider> {
    Box::new(CompatibleProvider::new(config, api_key))
}
