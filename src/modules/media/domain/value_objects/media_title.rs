//! Media title information with multiple locale variants

use serde::{Deserialize, Serialize};

/// Title locale a provider prefers when searching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleLocale {
    English,
    Romaji,
    Native,
}

impl TitleLocale {
    /// Fixed fallback order used whenever no preference applies
    pub const ALL: [TitleLocale; 3] =
        [TitleLocale::English, TitleLocale::Romaji, TitleLocale::Native];
}

/// Title of a media in its english, romanized and native forms
///
/// Every locale is optional; providers rarely know all three.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaTitle {
    pub english: Option<String>,
    pub romaji: Option<String>,
    pub native: Option<String>,
}

impl MediaTitle {
    pub fn new(
        english: Option<String>,
        romaji: Option<String>,
        native: Option<String>,
    ) -> Self {
        Self {
            english,
            romaji,
            native,
        }
    }

    /// Title with only the english locale set
    pub fn english(title: impl Into<String>) -> Self {
        Self {
            english: Some(title.into()),
            ..Self::default()
        }
    }

    /// Non-empty value for a locale
    pub fn get(&self, locale: TitleLocale) -> Option<&str> {
        let value = match locale {
            TitleLocale::English => self.english.as_deref(),
            TitleLocale::Romaji => self.romaji.as_deref(),
            TitleLocale::Native => self.native.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    pub fn slot_mut(&mut self, locale: TitleLocale) -> &mut Option<String> {
        match locale {
            TitleLocale::English => &mut self.english,
            TitleLocale::Romaji => &mut self.romaji,
            TitleLocale::Native => &mut self.native,
        }
    }

    /// First available title in english, romaji, native order
    pub fn primary(&self) -> Option<&str> {
        TitleLocale::ALL.iter().find_map(|locale| self.get(*locale))
    }

    pub fn is_empty(&self) -> bool {
        self.primary().is_none()
    }
}

impl std::fmt::Display for MediaTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.primary().unwrap_or("Unknown Title"))
    }
}
