use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Artwork, Character, MediaMapping, Relation};
use crate::modules::media::domain::value_objects::{
    MediaFormat, MediaStatus, MediaTitle, MediaType, Season,
};

/// Canonical anime or manga record assembled from every mapped provider
///
/// Created once when the first mapping for a reference id arrives and then
/// filled in place by each fusion pass. Anime-only fields (episodes, duration)
/// stay empty on manga and vice versa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaEntity {
    pub id: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub title: MediaTitle,
    pub synonyms: Vec<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub banner_image: Option<String>,
    pub trailer: Option<String>,
    pub status: MediaStatus,
    pub season: Season,
    pub year: Option<i32>,
    pub format: MediaFormat,
    pub country_of_origin: Option<String>,
    pub color: Option<String>,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
    pub artwork: Vec<Artwork>,
    pub characters: Vec<Character>,
    pub relations: Vec<Relation>,

    // Anime
    pub total_episodes: Option<u32>,
    pub current_episode: Option<u32>,
    pub duration: Option<u32>,

    // Manga
    pub total_chapters: Option<u32>,
    pub total_volumes: Option<u32>,
    pub current_chapter: Option<u32>,
    pub publisher: Option<String>,
    pub author: Option<String>,

    /// Provider id -> that provider's rating
    pub rating: BTreeMap<String, f64>,
    /// Provider id -> that provider's popularity
    pub popularity: BTreeMap<String, f64>,
    pub average_rating: f64,
    pub average_popularity: f64,

    pub mappings: Vec<MediaMapping>,
}

impl MediaEntity {
    /// Empty entity carrying only its identity
    pub fn new(id: impl Into<String>, slug: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            media_type,
            title: MediaTitle::default(),
            synonyms: Vec::new(),
            description: None,
            cover_image: None,
            banner_image: None,
            trailer: None,
            status: MediaStatus::Unknown,
            season: Season::Unknown,
            year: None,
            format: MediaFormat::Unknown,
            country_of_origin: None,
            color: None,
            genres: Vec::new(),
            tags: Vec::new(),
            artwork: Vec::new(),
            characters: Vec::new(),
            relations: Vec::new(),
            total_episodes: None,
            current_episode: None,
            duration: None,
            total_chapters: None,
            total_volumes: None,
            current_chapter: None,
            publisher: None,
            author: None,
            rating: BTreeMap::new(),
            popularity: BTreeMap::new(),
            average_rating: 0.0,
            average_popularity: 0.0,
            mappings: Vec::new(),
        }
    }

    /// Mapping recorded for a provider, if any
    pub fn mapping_for(&self, provider_id: &str) -> Option<&MediaMapping> {
        self.mappings.iter().find(|m| m.provider_id == provider_id)
    }

    pub fn has_mapping(&self, provider_id: &str, id: &str) -> bool {
        self.mappings
            .iter()
            .any(|m| m.provider_id == provider_id && m.id == id)
    }

    /// Appends a mapping unless the same provider/id pair is already present
    ///
    /// Returns whether the mapping was added.
    pub fn add_mapping(&mut self, mapping: MediaMapping) -> bool {
        if self.has_mapping(&mapping.provider_id, &mapping.id) {
            return false;
        }
        self.mappings.push(mapping);
        true
    }

    pub fn primary_title(&self) -> Option<&str> {
        self.title.primary()
    }
}
