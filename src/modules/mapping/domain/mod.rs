pub mod services;
pub mod value_objects;

pub use services::{
    extract_year, find_best_match, get_all_titles, sanitize_title, should_accept_update, slugify,
    FreshnessSnapshot, MatchResolver, SimilarityStrategy, TitleNormalizer,
};
pub use value_objects::{MatchResult, MatchType};
