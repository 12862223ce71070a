/// Test data factories using builder pattern
///
/// Provides convenient methods to create test data with sensible defaults
use miru_mapping_lib::modules::media::{
    Candidate, MediaEntity, MediaFormat, MediaTitle, MediaType, MetadataPatch, ReferenceRecord,
};

pub struct ReferenceFactory {
    id: String,
    english: Option<String>,
    romaji: Option<String>,
    native: Option<String>,
    synonyms: Vec<String>,
    year: Option<i32>,
    format: MediaFormat,
}

impl Default for ReferenceFactory {
    fn default() -> Self {
        Self {
            id: "ref-1".to_string(),
            english: Some("Test Anime".to_string()),
            romaji: None,
            native: None,
            synonyms: Vec::new(),
            year: None,
            format: MediaFormat::Unknown,
        }
    }
}

impl ReferenceFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frieren with every locale, a synonym and a year
    pub fn frieren() -> Self {
        Self::default()
            .with_id("154587")
            .with_english("Frieren: Beyond Journey's End")
            .with_romaji("Sousou no Frieren")
            .with_native("葬送のフリーレン")
            .with_synonyms(&["Frieren"])
            .with_year(2023)
            .with_format(MediaFormat::Tv)
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_english(mut self, title: &str) -> Self {
        self.english = Some(title.to_string());
        self
    }

    pub fn without_english(mut self) -> Self {
        self.english = None;
        self
    }

    pub fn with_romaji(mut self, title: &str) -> Self {
        self.romaji = Some(title.to_string());
        self
    }

    pub fn with_native(mut self, title: &str) -> Self {
        self.native = Some(title.to_string());
        self
    }

    pub fn with_synonyms(mut self, synonyms: &[&str]) -> Self {
        self.synonyms = synonyms.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_format(mut self, format: MediaFormat) -> Self {
        self.format = format;
        self
    }

    pub fn build(self) -> ReferenceRecord {
        let title = MediaTitle::new(self.english, self.romaji, self.native);
        let mut reference = ReferenceRecord::new(self.id, title)
            .with_synonyms(self.synonyms)
            .with_format(self.format);
        reference.year = self.year;
        reference
    }
}

/// Candidate as `provider_id` would report it
pub fn candidate(provider_id: &str, id: &str, title: &str) -> Candidate {
    Candidate::new(id, title, provider_id)
}

pub fn empty_media(id: &str) -> MediaEntity {
    MediaEntity::new(id, format!("media-{}", id), MediaType::Anime)
}

pub fn rating_patch(rating: f64) -> MetadataPatch {
    MetadataPatch {
        rating: Some(rating),
        ..MetadataPatch::default()
    }
}
