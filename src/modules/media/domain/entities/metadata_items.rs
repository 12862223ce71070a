use serde::{Deserialize, Serialize};

use crate::modules::media::domain::value_objects::{MediaFormat, MediaTitle, MediaType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtworkKind {
    Poster,
    Banner,
    Cover,
    ClearLogo,
    Icon,
}

/// Image contributed by a provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub img: String,
    pub kind: ArtworkKind,
    pub provider_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub voice_actor: Option<String>,
}

/// Link from a media to a related work on the same provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub id: String,
    pub media_type: MediaType,
    pub title: MediaTitle,
    #[serde(default)]
    pub format: MediaFormat,
    /// Provider wording, e.g. "SEQUEL" or "ADAPTATION"
    pub relation_type: String,
}
