use serde::{Deserialize, Serialize};

use crate::modules::media::domain::value_objects::MediaFormat;

/// One search hit returned by a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Provider-local identifier
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub alt_titles: Vec<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub format: MediaFormat,
    #[serde(default)]
    pub image: Option<String>,
    pub provider_id: String,
}

impl Candidate {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        provider_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            alt_titles: Vec::new(),
            year: None,
            format: MediaFormat::Unknown,
            image: None,
            provider_id: provider_id.into(),
        }
    }

    pub fn with_alt_titles<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alt_titles = titles.into_iter().map(Into::into).collect();
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

    /// Main title followed by alternative titles, blanks skipped
    pub fn all_titles(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title.as_str())
            .chain(self.alt_titles.iter().map(String::as_str))
            .filter(|t| !t.trim().is_empty())
    }

    /// Explicit release year, ignoring the zero placeholder
    pub fn explicit_year(&self) -> Option<i32> {
        self.year.filter(|y| *y != 0)
    }
}
