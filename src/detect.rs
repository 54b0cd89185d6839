//! 文字范围检测
//!
//! 按 Unicode 区块粗略判断文本属于日语还是韩语。
//! 不做分词、不做概率模型：只要出现一个落在区块内的字符即命中。
//!
//! # 混合文字的优先级
//! 日语区块（平假名、片假名、CJK 汉字）先于韩文音节检查。
//! 同时包含两种文字的消息一律按日语处理。

use std::sync::LazyLock;

use regex::Regex;

/// 平假名 U+3040–U+309F、片假名 U+30A0–U+30FF、CJK 统一汉字 U+4E00–U+9FFF
static JAPANESE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new("[\u{3040}-\u{30FF}\u{4E00}-\u{9FFF}]").ok());

/// 韩文音节 U+AC00–U+D7A3
static KOREAN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new("[\u{AC00}-\u{D7A3}]").ok());

/// 正则构建失败时视为不匹配
fn has_match(re: &Option<Regex>, text: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(text))
}

/// 检测结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    /// 含假名或汉字
    Japanese,
    /// 含韩文音节（且不含日语区块字符）
    Korean,
    /// 两者都不含
    Other,
}

impl Script {
    /// 是否需要翻译
    pub fn is_translatable(self) -> bool {
        self != Self::Other
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Japanese => "ja",
            Self::Korean => "ko",
            Self::Other => "other",
        }
    }
}

/// 判断文本的文字类别，日语优先
pub fn classify(text: &str) -> Script {
    if has_match(&JAPANESE, text) {
        Script::Japanese
    } else if has_match(&KOREAN, text) {
        Script::Korean
    } else {
        Script::Other
    }
}
