use futures::future::join_all;
use std::sync::Arc;
use tokio::time::timeout;

use crate::modules::fusion::domain::services::fill_media_info;
use crate::modules::media::{Mapping, MediaEntity, MediaMapping, MediaType, MetadataPatch};
use crate::modules::provider::{InfoProvider, ProviderRegistry, ProviderType, RateLimiterRegistry};
use crate::shared::config::MappingConfig;
use crate::shared::errors::AppError;
use crate::shared::utils::logger::LogContext;

/// Turns confirmed mappings into media entities and fills in their metadata
///
/// Info fetches for one entity run concurrently; the returned patches are
/// merged one provider at a time in registry order so the plain and priority
/// rules stay deterministic.
pub struct MediaFusionService {
    registry: Arc<ProviderRegistry>,
    limiters: Arc<RateLimiterRegistry>,
    config: Arc<MappingConfig>,
}

impl MediaFusionService {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        limiters: Arc<RateLimiterRegistry>,
        config: Arc<MappingConfig>,
    ) -> Self {
        Self {
            registry,
            limiters,
            config,
        }
    }

    /// Group mappings by reference id into new entities and fuse each one
    pub async fn create_media(
        &self,
        mappings: &[Mapping],
        media_type: MediaType,
    ) -> Vec<MediaEntity> {
        self.extend_media(Vec::new(), mappings, media_type).await
    }

    /// Like [`create_media`](Self::create_media), reusing entities that already exist
    ///
    /// Only entities that received a mapping are fused again; the rest are
    /// returned untouched.
    pub async fn extend_media(
        &self,
        existing: Vec<MediaEntity>,
        mappings: &[Mapping],
        media_type: MediaType,
    ) -> Vec<MediaEntity> {
        let mut media = existing;
        let mut touched: Vec<usize> = Vec::new();

        for mapping in mappings {
            let index = self.attach(&mut media, mapping, media_type);
            if !touched.contains(&index) {
                touched.push(index);
            }
        }

        for index in touched {
            self.fuse(&mut media[index]).await;
        }

        media
    }

    /// Add a mapping to its entity, creating the entity on first sight
    fn attach(
        &self,
        media: &mut Vec<MediaEntity>,
        mapping: &Mapping,
        media_type: MediaType,
    ) -> usize {
        let provider_id = &mapping.data.provider_id;
        let entry = MediaMapping {
            id: mapping.data.id.clone(),
            provider_id: provider_id.clone(),
            provider_type: self
                .registry
                .provider_type_of(provider_id)
                .unwrap_or(ProviderType::Base),
            similarity: mapping.similarity,
        };

        if let Some(index) = media.iter().position(|m| m.id == mapping.id) {
            if !media[index].add_mapping(entry) {
                log::debug!(
                    "Mapping {}:{} already recorded on {}",
                    provider_id,
                    mapping.data.id,
                    mapping.id
                );
            }
            return index;
        }

        let mut entity = MediaEntity::new(&mapping.id, &mapping.slug, media_type);
        entity.add_mapping(entry);
        media.push(entity);
        media.len() - 1
    }

    async fn fuse(&self, media: &mut MediaEntity) {
        let providers = self.registry.select_info_providers(media.media_type);
        if providers.is_empty() {
            return;
        }

        let patches = {
            let snapshot: &MediaEntity = media;
            let fetches = providers
                .iter()
                .map(|provider| self.fetch_info(provider.as_ref(), snapshot));
            join_all(fetches).await
        };

        for (provider, patch) in providers.iter().zip(patches) {
            if let Some(patch) = patch {
                fill_media_info(media, patch, provider.descriptor());
            }
        }

        log::debug!(
            "Fused {} with {} info providers ({} mappings)",
            media.id,
            providers.len(),
            media.mappings.len()
        );
    }

    async fn fetch_info(
        &self,
        provider: &dyn InfoProvider,
        media: &MediaEntity,
    ) -> Option<MetadataPatch> {
        let provider_id = provider.descriptor().id.as_str();
        self.limiters.acquire(provider_id).await;

        match timeout(self.config.info_timeout, provider.info(media)).await {
            Ok(Ok(patch)) => patch,
            Ok(Err(e)) => {
                LogContext::provider_failure("Info", &media.id, provider_id, &e);
                None
            }
            Err(_) => {
                let error = AppError::Timeout(format!(
                    "no response after {:?}",
                    self.config.info_timeout
                ));
                LogContext::provider_failure("Info", &media.id, provider_id, &error);
                None
            }
        }
    }
}
