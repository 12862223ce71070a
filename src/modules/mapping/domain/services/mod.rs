pub mod freshness_policy;
pub mod match_resolver;
pub mod similarity_strategy;
pub mod title_normalizer;

pub use freshness_policy::{should_accept_update, FreshnessSnapshot};
pub use match_resolver::{find_best_match, MatchResolver};
pub use similarity_strategy::{LevenshteinStrategy, SimilarityStrategy};
pub use title_normalizer::{
    extract_year, get_all_titles, sanitize_title, slugify, TitleNormalizer, TitleSource,
    TitleTransformation,
};
