use serde::{Deserialize, Serialize};

use super::{Artwork, Character, Relation};
use crate::modules::media::domain::value_objects::{MediaFormat, MediaStatus, MediaTitle, Season};
use crate::shared::errors::AppResult;

/// Partial metadata returned by one provider's info capability
///
/// Every field is optional: `None` means the provider has nothing to say.
/// `rating` and `popularity` are the provider's own scalar values; fusion
/// files them under the provider id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetadataPatch {
    pub title: Option<MediaTitle>,
    pub synonyms: Option<Vec<String>>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub banner_image: Option<String>,
    pub trailer: Option<String>,
    pub status: Option<MediaStatus>,
    pub season: Option<Season>,
    pub year: Option<i32>,
    pub format: Option<MediaFormat>,
    pub country_of_origin: Option<String>,
    pub color: Option<String>,
    pub genres: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub artwork: Option<Vec<Artwork>>,
    pub characters: Option<Vec<Character>>,
    pub relations: Option<Vec<Relation>>,
    pub total_episodes: Option<u32>,
    pub current_episode: Option<u32>,
    pub duration: Option<u32>,
    pub total_chapters: Option<u32>,
    pub total_volumes: Option<u32>,
    pub current_chapter: Option<u32>,
    pub publisher: Option<String>,
    pub author: Option<String>,
    pub rating: Option<f64>,
    pub popularity: Option<f64>,
}

impl MetadataPatch {
    /// Decode a patch from a provider's JSON payload
    pub fn from_json(value: serde_json::Value) -> AppResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}
