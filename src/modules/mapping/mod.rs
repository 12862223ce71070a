pub mod application;
pub mod domain;

// Re-exports for easy external access
pub use application::{MappingService, SearchOrchestrator};
pub use domain::{
    extract_year, find_best_match, get_all_titles, sanitize_title, should_accept_update, slugify,
    FreshnessSnapshot, MatchResolver, MatchResult, MatchType, TitleNormalizer,
};
