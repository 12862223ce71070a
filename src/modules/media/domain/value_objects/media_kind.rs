use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of media being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Anime,
    Manga,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Anime => write!(f, "anime"),
            MediaType::Manga => write!(f, "manga"),
        }
    }
}

/// Release format of a media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaFormat {
    Tv,
    TvShort,
    Movie,
    Special,
    Ova,
    Ona,
    Music,
    Manga,
    Novel,
    OneShot,
    #[default]
    Unknown,
}

impl MediaFormat {
    pub const ANIME: [MediaFormat; 7] = [
        MediaFormat::Tv,
        MediaFormat::TvShort,
        MediaFormat::Movie,
        MediaFormat::Special,
        MediaFormat::Ova,
        MediaFormat::Ona,
        MediaFormat::Music,
    ];

    pub const MANGA: [MediaFormat; 3] =
        [MediaFormat::Manga, MediaFormat::Novel, MediaFormat::OneShot];

    /// Formats that belong to a media type
    pub fn for_type(media_type: MediaType) -> &'static [MediaFormat] {
        match media_type {
            MediaType::Anime => &Self::ANIME,
            MediaType::Manga => &Self::MANGA,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, MediaFormat::Unknown)
    }
}

impl From<&str> for MediaFormat {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "tv" => MediaFormat::Tv,
            "tv_short" => MediaFormat::TvShort,
            "movie" => MediaFormat::Movie,
            "special" => MediaFormat::Special,
            "ova" => MediaFormat::Ova,
            "ona" => MediaFormat::Ona,
            "music" => MediaFormat::Music,
            "manga" => MediaFormat::Manga,
            "novel" | "light_novel" => MediaFormat::Novel,
            "one_shot" | "oneshot" => MediaFormat::OneShot,
            _ => MediaFormat::Unknown,
        }
    }
}

/// Publication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaStatus {
    Releasing,
    Finished,
    NotYetReleased,
    Cancelled,
    Hiatus,
    #[default]
    Unknown,
}

impl MediaStatus {
    pub fn is_empty(&self) -> bool {
        matches!(self, MediaStatus::Unknown)
    }
}

impl From<&str> for MediaStatus {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "releasing" | "airing" | "currently airing" | "publishing" => MediaStatus::Releasing,
            "finished" | "finished airing" | "completed" => MediaStatus::Finished,
            "not_yet_released" | "not yet aired" | "upcoming" => MediaStatus::NotYetReleased,
            "cancelled" => MediaStatus::Cancelled,
            "hiatus" | "on hiatus" => MediaStatus::Hiatus,
            _ => MediaStatus::Unknown,
        }
    }
}

/// Broadcast season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
    #[default]
    Unknown,
}

impl Season {
    pub fn is_empty(&self) -> bool {
        matches!(self, Season::Unknown)
    }
}
