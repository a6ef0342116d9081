use chrono::{DateTime, Local, Timelike};
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    En,
    Id,
}

impl Language {
    /// Accepts bare codes (`id`) as well as locale-style values (`id_ID.UTF-8`, `en_US:en`).
    pub fn from_env_value(raw: &str) -> Self {
        let code = raw
            .split([':', '_', '.', '-'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        match code.as_str() {
            "en" | "" => Language::En,
            "id" => Language::Id,
            _ => {
                warn!(language = %raw, "unsupported language, falling back to English");
                Language::En
            }
        }
    }

    pub fn tips(&self) -> &'static [&'static str; 3] {
        match self {
            Language::En => &EN_TIPS,
            Language::Id => &ID_TIPS,
        }
    }
}

const EN_TIPS: [&str; 3] = [
    "💰 Don't chase losses - stick to your strategy",
    "🧘 Trade the chart, not your emotions",
    "⚖️ Always use proper risk management",
];

const ID_TIPS: [&str; 3] = [
    "💰 Jangan kejar kerugian - patuhi strategi",
    "🧘 Tradinglah berdasarkan chart, bukan emosi",
    "⚖️ Selalu gunakan manajemen risiko yang tepat",
];

pub fn get_tip(language: Language, now: DateTime<Local>) -> &'static str {
    let tips = language.tips();
    tips[now.second() as usize % tips.len()]
}
