use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Every metadata field the fusion engine knows how to merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MediaField {
    Title,
    Synonyms,
    Description,
    CoverImage,
    BannerImage,
    Trailer,
    Status,
    Season,
    Year,
    Format,
    CountryOfOrigin,
    Color,
    Genres,
    Tags,
    Artwork,
    Characters,
    Relations,
    TotalEpisodes,
    CurrentEpisode,
    Duration,
    TotalChapters,
    TotalVolumes,
    CurrentChapter,
    Publisher,
    Author,
    Rating,
    Popularity,
}

impl MediaField {
    /// Fields kept per provider and averaged instead of overwritten
    pub const CROSS_LOAD: [MediaField; 2] = [MediaField::Popularity, MediaField::Rating];

    pub fn is_cross_load(&self) -> bool {
        Self::CROSS_LOAD.contains(self)
    }

    /// Whether the field holds a list that can be unioned
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            MediaField::Synonyms
                | MediaField::Genres
                | MediaField::Tags
                | MediaField::Artwork
                | MediaField::Characters
                | MediaField::Relations
        )
    }
}

/// How a provider's value for a field is merged into the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClass {
    /// Written only into an empty field, unless the provider has priority
    Plain { priority: bool },
    /// Unioned with every other provider's values
    Shared,
    /// Stored under the provider id, never replacing another provider's entry
    CrossLoad,
}

/// Per-provider classification of metadata fields
///
/// Fields not mentioned are plain without priority. Rating and popularity are
/// always cross-load, and only collection fields can be shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPolicy {
    shared: HashSet<MediaField>,
    priority: HashSet<MediaField>,
}

impl FieldPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare fields this provider unions with other providers
    pub fn with_shared<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = MediaField>,
    {
        for field in fields {
            if field.is_cross_load() || !field.is_collection() {
                log::debug!("Ignoring shared declaration for non-collection field {:?}", field);
                continue;
            }
            self.shared.insert(field);
        }
        self
    }

    /// Declare fields this provider may overwrite unconditionally
    pub fn with_priority<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = MediaField>,
    {
        for field in fields {
            if field.is_cross_load() {
                log::debug!("Ignoring priority declaration for cross-load field {:?}", field);
                continue;
            }
            self.priority.insert(field);
        }
        self
    }

    pub fn class_of(&self, field: MediaField) -> FieldClass {
        if field.is_cross_load() {
            FieldClass::CrossLoad
        } else if self.shared.contains(&field) {
            FieldClass::Shared
        } else {
            FieldClass::Plain {
                priority: self.priority.contains(&field),
            }
        }
    }

    pub fn is_shared(&self, field: MediaField) -> bool {
        matches!(self.class_of(field), FieldClass::Shared)
    }

    pub fn is_priority(&self, field: MediaField) -> bool {
        matches!(self.class_of(field), FieldClass::Plain { priority: true })
    }
}
