use serde::{Deserialize, Serialize};
use std::fmt;

use super::FieldPolicy;
use crate::modules::media::{MediaFormat, MediaType, TitleLocale};

/// Role a provider plays in the mapping pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Format-aware catalogues consulted for every media type
    Base,
    Anime,
    Manga,
    /// Cross-media databases (TVDB, TMDB style) consulted for anime
    Meta,
    /// Metadata-only sources that never take part in searches
    Information,
}

impl ProviderType {
    /// Whether providers of this type are searched for the given media type
    pub fn serves(&self, media_type: MediaType) -> bool {
        match (self, media_type) {
            (ProviderType::Base, _) => true,
            (ProviderType::Anime | ProviderType::Meta, MediaType::Anime) => true,
            (ProviderType::Manga, MediaType::Manga) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderType::Base => "base",
            ProviderType::Anime => "anime",
            ProviderType::Manga => "manga",
            ProviderType::Meta => "meta",
            ProviderType::Information => "information",
        };
        write!(f, "{}", name)
    }
}

/// Static description of a provider's capabilities
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderDescriptor {
    pub id: String,
    pub provider_type: ProviderType,
    /// Locale tried first when searching this provider
    pub preferred_title: TitleLocale,
    pub formats: Vec<MediaFormat>,
    pub field_policy: FieldPolicy,
    /// Sustained request rate; `None` disables throttling
    pub requests_per_second: Option<f64>,
    pub burst: u32,
}

impl ProviderDescriptor {
    pub fn new(id: impl Into<String>, provider_type: ProviderType) -> Self {
        Self {
            id: id.into(),
            provider_type,
            preferred_title: TitleLocale::English,
            formats: Vec::new(),
            field_policy: FieldPolicy::new(),
            requests_per_second: None,
            burst: 1,
        }
    }

    pub fn with_preferred_title(mut self, locale: TitleLocale) -> Self {
        self.preferred_title = locale;
        self
    }

    pub fn with_formats<I>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = MediaFormat>,
    {
        self.formats = formats.into_iter().collect();
        self
    }

    pub fn with_field_policy(mut self, policy: FieldPolicy) -> Self {
        self.field_policy = policy;
        self
    }

    pub fn with_rate_limit(mut self, requests_per_second: f64, burst: u32) -> Self {
        self.requests_per_second = Some(requests_per_second);
        self.burst = burst;
        self
    }

    /// True when the provider handles at least one of the formats
    ///
    /// An empty request list means "any format".
    pub fn supports_any(&self, formats: &[MediaFormat]) -> bool {
        formats.is_empty() || formats.iter().any(|f| self.formats.contains(f))
    }
}
