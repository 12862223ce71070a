use serde::{Deserialize, Serialize};

use super::MediaEntity;
use crate::modules::media::domain::value_objects::{MediaFormat, MediaTitle};

/// Record every provider's candidates are resolved against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceRecord {
    pub id: String,
    pub title: MediaTitle,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub format: MediaFormat,
}

impl ReferenceRecord {
    pub fn new(id: impl Into<String>, title: MediaTitle) -> Self {
        Self {
            id: id.into(),
            title,
            synonyms: Vec::new(),
            year: None,
            format: MediaFormat::Unknown,
        }
    }

    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms = synonyms.into_iter().map(Into::into).collect();
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

    pub fn explicit_year(&self) -> Option<i32> {
        self.year.filter(|y| *y != 0)
    }
}

impl From<&MediaEntity> for ReferenceRecord {
    fn from(media: &MediaEntity) -> Self {
        Self {
            id: media.id.clone(),
            title: media.title.clone(),
            synonyms: media.synonyms.clone(),
            year: media.year,
            format: media.format,
        }
    }
}
