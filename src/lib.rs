//! Anime and manga identity resolution and metadata fusion
//!
//! A [`MappingService`] takes a reference record, searches every eligible
//! provider for it, resolves each provider's candidates to at most one
//! confident match and fuses the providers' metadata into [`MediaEntity`]
//! records. Providers plug in through the [`SearchProvider`] and
//! [`InfoProvider`] traits.

pub mod modules;
pub mod shared;

pub use modules::fusion::{average_metric, fill_media_info, MediaFusionService};
pub use modules::mapping::{
    extract_year, find_best_match, get_all_titles, sanitize_title, slugify, MappingService,
    MatchResolver, MatchResult, MatchType,
};
pub use modules::media::{Candidate, Mapping, MediaEntity, MetadataPatch, ReferenceRecord};
pub use modules::provider::{
    InfoProvider, ProviderDescriptor, ProviderRegistry, ProviderType, RateLimiterRegistry,
    SearchProvider, SearchRequest,
};
pub use shared::config::MappingConfig;
pub use shared::errors::{AppError, AppResult};
pub use shared::utils::logger::init_logger;
