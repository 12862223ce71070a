use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

use crate::modules::media::MediaTitle;
use crate::shared::errors::AppResult;

/// Longest sanitized title kept for comparison
pub const DEFAULT_MAX_TITLE_LENGTH: usize = 100;

/// Bracketed asides: "(TV)", "[Uncensored]", "{OVA}", "【推しの子】"
const BRACKETS: &str = r"\([^)]*\)|\[[^\]]*\]|\{[^}]*\}|【[^】]*】";
/// "2nd season", "3rd part", "1st cour"
const ORDINAL_MARKERS: &str = r"\b\d+(?:st|nd|rd|th)\s+(?:season|part|cour|chapter)s?\b";
/// "season 2", "part 3", "chapter 10"
const NUMBERED_MARKERS: &str = r"\b(?:season|part|cour|chapter)\s*\d+\b";
/// Bare markers left behind: "final season", "specials"
const BARE_MARKERS: &str = r"\b(?:season|part|cour|chapter|specials?)\b";
/// Release variants that never distinguish two works
const RELEASE_MARKERS: &str = r"\b(?:sub|subbed|dub|dubbed|uncut|uncensored|censored)\b";

const TRANSLITERATIONS: [(&str, &str); 6] = [
    ("yuu", "yu"),
    ("kyou", "kyo"),
    ("shou", "sho"),
    ("ryou", "ryo"),
    ("jou", "jo"),
    ("tsuu", "tsu"),
];

static DEFAULT_SANITIZER: LazyLock<TitleNormalizer> =
    LazyLock::new(|| TitleNormalizer::sanitizer(DEFAULT_MAX_TITLE_LENGTH));

static YEAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9])((?:19|20)[0-9]{2})(?:[^0-9]|$)").expect("year pattern is valid")
});

/// Transformation that can be applied to a title
///
/// Each transformation is composable and testable in isolation.
pub trait TitleTransformation: Send + Sync {
    fn transform(&self, title: &str) -> String;
    fn name(&self) -> &'static str;
}

/// Converts title to lowercase
#[derive(Debug, Clone)]
pub struct LowercaseTransform;

impl TitleTransformation for LowercaseTransform {
    fn transform(&self, title: &str) -> String {
        title.to_lowercase()
    }

    fn name(&self) -> &'static str {
        "Lowercase"
    }
}

/// Removes every match of the given regular expressions
#[derive(Debug, Clone)]
pub struct RemovePatternsTransform {
    patterns: Vec<Regex>,
}

impl RemovePatternsTransform {
    pub fn new(patterns: &[&str]) -> AppResult<Self> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Season/part/cour markers, bracketed asides and release variants
    pub fn release_markers() -> Self {
        static MARKERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
            [BRACKETS, ORDINAL_MARKERS, NUMBERED_MARKERS, BARE_MARKERS, RELEASE_MARKERS]
                .iter()
                .map(|p| Regex::new(p).expect("marker pattern is valid"))
                .collect()
        });
        Self {
            patterns: MARKERS.clone(),
        }
    }
}

impl TitleTransformation for RemovePatternsTransform {
    fn transform(&self, title: &str) -> String {
        let mut result = title.to_string();
        for pattern in &self.patterns {
            result = pattern.replace_all(&result, " ").into_owned();
        }
        result
    }

    fn name(&self) -> &'static str {
        "RemovePatterns"
    }
}

/// Folds accented latin letters onto their base letter ("ō" -> "o")
///
/// Only the combining diacritical marks block is dropped, so kana voicing
/// marks survive.
#[derive(Debug, Clone)]
pub struct StripDiacriticsTransform;

impl TitleTransformation for StripDiacriticsTransform {
    fn transform(&self, title: &str) -> String {
        title
            .nfd()
            .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
            .nfc()
            .collect()
    }

    fn name(&self) -> &'static str {
        "StripDiacritics"
    }
}

/// Unifies romanization variants ("yuu" -> "yu")
#[derive(Debug, Clone)]
pub struct TransliterationTransform {
    pairs: Vec<(String, String)>,
}

impl TransliterationTransform {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            pairs: pairs
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }
}

impl Default for TransliterationTransform {
    fn default() -> Self {
        Self::new(&TRANSLITERATIONS)
    }
}

impl TitleTransformation for TransliterationTransform {
    fn transform(&self, title: &str) -> String {
        let mut result = title.to_string();
        for (from, to) in &self.pairs {
            result = result.replace(from.as_str(), to);
        }
        result
    }

    fn name(&self) -> &'static str {
        "Transliteration"
    }
}

/// Turns punctuation into word breaks; apostrophes are dropped outright
#[derive(Debug, Clone)]
pub struct RemoveSpecialCharsTransform;

impl TitleTransformation for RemoveSpecialCharsTransform {
    fn transform(&self, title: &str) -> String {
        title
            .chars()
            .filter(|c| !matches!(c, '\'' | '’' | '`'))
            .map(|c| {
                if c.is_alphanumeric() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "RemoveSpecialChars"
    }
}

/// Normalizes whitespace (collapses multiple spaces, trims)
#[derive(Debug, Clone)]
pub struct NormalizeWhitespaceTransform;

impl TitleTransformation for NormalizeWhitespaceTransform {
    fn transform(&self, title: &str) -> String {
        title.split_whitespace().collect::<Vec<&str>>().join(" ")
    }

    fn name(&self) -> &'static str {
        "NormalizeWhitespace"
    }
}

/// Keeps at most `max_chars` characters
#[derive(Debug, Clone)]
pub struct TruncateTransform {
    max_chars: usize,
}

impl TruncateTransform {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

impl TitleTransformation for TruncateTransform {
    fn transform(&self, title: &str) -> String {
        title.chars().take(self.max_chars).collect::<String>().trim_end().to_string()
    }

    fn name(&self) -> &'static str {
        "Truncate"
    }
}

/// Title normalizer that applies a pipeline of transformations
///
/// Uses the builder pattern for composability and testability.
pub struct TitleNormalizer {
    transformations: Vec<Box<dyn TitleTransformation>>,
}

impl TitleNormalizer {
    /// Create a new empty normalizer
    pub fn new() -> Self {
        Self {
            transformations: Vec::new(),
        }
    }

    /// Pipeline used on both sides of every title comparison
    pub fn sanitizer(max_title_length: usize) -> Self {
        Self::new()
            .with_lowercase()
            .with_strip_diacritics()
            .with(RemovePatternsTransform::release_markers())
            .with(TransliterationTransform::default())
            .with_remove_special_chars()
            .with_normalize_whitespace()
            .with(TruncateTransform::new(max_title_length))
    }

    /// Add any transformation
    pub fn with<T: TitleTransformation + 'static>(mut self, transformation: T) -> Self {
        self.transformations.push(Box::new(transformation));
        self
    }

    /// Add lowercase transformation
    pub fn with_lowercase(self) -> Self {
        self.with(LowercaseTransform)
    }

    /// Add diacritic folding
    pub fn with_strip_diacritics(self) -> Self {
        self.with(StripDiacriticsTransform)
    }

    /// Add special character removal transformation
    pub fn with_remove_special_chars(self) -> Self {
        self.with(RemoveSpecialCharsTransform)
    }

    /// Add whitespace normalization transformation
    pub fn with_normalize_whitespace(self) -> Self {
        self.with(NormalizeWhitespaceTransform)
    }

    /// Apply all transformations to the title
    pub fn normalize(&self, title: &str) -> String {
        let mut result = title.to_string();

        for transformation in &self.transformations {
            result = transformation.transform(&result);
            log::trace!("After {}: '{}'", transformation.name(), result);
        }

        result
    }

    /// Normalize, treating empty input and empty output as absent
    pub fn sanitize(&self, title: &str) -> Option<String> {
        if title.trim().is_empty() {
            return None;
        }
        let sanitized = self.normalize(title);
        (!sanitized.is_empty()).then_some(sanitized)
    }

    /// Get the number of transformations in the pipeline
    pub fn transformation_count(&self) -> usize {
        self.transformations.len()
    }
}

impl Default for TitleNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Comparable form of a title, or `None` when nothing comparable is left
pub fn sanitize_title<'a>(title: impl Into<Option<&'a str>>) -> Option<String> {
    title.into().and_then(|t| DEFAULT_SANITIZER.sanitize(t))
}

/// First plausible release year (1900-2099) appearing in the text
pub fn extract_year(text: &str) -> Option<i32> {
    YEAR_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Anything that can be flattened into a list of candidate titles
pub trait TitleSource {
    fn all_titles(&self) -> Vec<String>;
}

impl TitleSource for MediaTitle {
    fn all_titles(&self) -> Vec<String> {
        [&self.english, &self.romaji, &self.native]
            .into_iter()
            .flatten()
            .filter(|t| !t.trim().is_empty())
            .cloned()
            .collect()
    }
}

impl TitleSource for str {
    fn all_titles(&self) -> Vec<String> {
        if self.trim().is_empty() {
            Vec::new()
        } else {
            vec![self.to_string()]
        }
    }
}

impl TitleSource for String {
    fn all_titles(&self) -> Vec<String> {
        self.as_str().all_titles()
    }
}

/// Flatten a multi-locale title (or a bare string) into its set titles
pub fn get_all_titles<T: TitleSource + ?Sized>(source: &T) -> Vec<String> {
    source.all_titles()
}

/// URL-safe identifier derived from a title
pub fn slugify(title: &str) -> String {
    let folded = StripDiacriticsTransform.transform(&title.to_lowercase());
    let mut slug = String::with_capacity(folded.len());
    let mut pending_dash = false;

    for c in folded.chars().filter(|c| !matches!(c, '\'' | '’')) {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}
