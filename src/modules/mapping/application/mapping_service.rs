use std::sync::Arc;

use super::search_orchestrator::SearchOrchestrator;
use crate::modules::fusion::MediaFusionService;
use crate::modules::mapping::domain::services::{slugify, MatchResolver};
use crate::modules::media::{Mapping, MediaEntity, MediaFormat, MediaType, ReferenceRecord};
use crate::modules::provider::{ProviderRegistry, RateLimiterRegistry};
use crate::shared::config::MappingConfig;
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::{LogContext, TimedOperation};

/// Top-level identity resolution pipeline
///
/// Searches every eligible provider for a reference record, keeps the
/// confident matches and hands them to fusion. Provider failures only ever
/// shrink the result; `map` itself never fails.
pub struct MappingService {
    registry: Arc<ProviderRegistry>,
    config: Arc<MappingConfig>,
    search: SearchOrchestrator,
    resolver: MatchResolver,
    fusion: MediaFusionService,
}

impl MappingService {
    /// Build the pipeline with a limiter for every throttled provider
    pub fn new(registry: ProviderRegistry, config: MappingConfig) -> AppResult<Self> {
        config.validate()?;

        let limiters = RateLimiterRegistry::new();
        limiters.register_all(registry.descriptors())?;

        Ok(Self::with_limiters(
            Arc::new(registry),
            Arc::new(limiters),
            Arc::new(config),
        ))
    }

    /// Build the pipeline around an existing limiter registry
    pub fn with_limiters(
        registry: Arc<ProviderRegistry>,
        limiters: Arc<RateLimiterRegistry>,
        config: Arc<MappingConfig>,
    ) -> Self {
        Self {
            search: SearchOrchestrator::new(Arc::clone(&limiters), Arc::clone(&config)),
            resolver: MatchResolver::new(&config),
            fusion: MediaFusionService::new(Arc::clone(&registry), limiters, Arc::clone(&config)),
            registry,
            config,
        }
    }

    /// Resolve a reference record on every eligible provider and fuse the result
    ///
    /// An empty `formats` list places no format restriction on providers.
    pub async fn map(
        &self,
        media_type: MediaType,
        formats: &[MediaFormat],
        reference: &ReferenceRecord,
    ) -> Vec<MediaEntity> {
        let timer = TimedOperation::new("map");

        let mappings = self.find_mappings(media_type, formats, reference).await;
        let media = self.fusion.create_media(&mappings, media_type).await;

        timer.finish_with_info(&format!(
            "'{}' -> {} mappings",
            reference.title,
            mappings.len()
        ));
        media
    }

    /// Confident mappings for a reference record, one per matching provider
    pub async fn find_mappings(
        &self,
        media_type: MediaType,
        formats: &[MediaFormat],
        reference: &ReferenceRecord,
    ) -> Vec<Mapping> {
        let providers = self.registry.select_search_providers(media_type, formats);
        if providers.is_empty() {
            log::info!("No {} search providers for formats {:?}", media_type, formats);
            return Vec::new();
        }

        let results = self.search.search_media(reference, &providers).await;
        let title = reference.title.to_string();
        let slug = slugify(reference.title.primary().unwrap_or_default());
        let mut mappings = Vec::new();

        for (provider, candidates) in providers.iter().zip(results) {
            let provider_id = provider.descriptor().id.as_str();

            if candidates.is_empty() {
                log::info!("No results from {} for '{}'", provider_id, title);
                continue;
            }

            let Some(found) = self.resolver.find_best_match(reference, &candidates) else {
                LogContext::match_outcome(provider_id, &title, None);
                continue;
            };

            if found.similarity < self.config.similarity_floor {
                log::info!(
                    "Unable to match '{}' on {}: best was '{}' at {:.2}",
                    title,
                    provider_id,
                    found.matched_title,
                    found.similarity
                );
                continue;
            }

            LogContext::match_outcome(provider_id, &title, Some(found.similarity));
            mappings.push(Mapping {
                id: reference.id.clone(),
                slug: slug.clone(),
                data: found.candidate,
                similarity: found.similarity,
            });
        }

        mappings
    }
}
