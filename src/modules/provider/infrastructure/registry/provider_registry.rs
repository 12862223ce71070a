use std::sync::Arc;

use crate::modules::{
    media::{MediaFormat, MediaType},
    provider::domain::{InfoProvider, ProviderDescriptor, ProviderType, SearchProvider},
};

/// Ordered collection of the providers a pipeline may use
///
/// Registration order is the configured order: searches report results in
/// it and fusion applies info patches in it. A provider id is registered at
/// most once per role; later registrations with the same id are ignored.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    search_providers: Vec<Arc<dyn SearchProvider>>,
    info_providers: Vec<Arc<dyn InfoProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_search(&mut self, provider: Arc<dyn SearchProvider>) -> &mut Self {
        let id = &provider.descriptor().id;
        if self.search_providers.iter().any(|p| &p.descriptor().id == id) {
            log::warn!("Search provider {} already registered, ignoring duplicate", id);
        } else {
            self.search_providers.push(provider);
        }
        self
    }

    pub fn register_info(&mut self, provider: Arc<dyn InfoProvider>) -> &mut Self {
        let id = &provider.descriptor().id;
        if self.info_providers.iter().any(|p| &p.descriptor().id == id) {
            log::warn!("Info provider {} already registered, ignoring duplicate", id);
        } else {
            self.info_providers.push(provider);
        }
        self
    }

    pub fn search_providers(&self) -> &[Arc<dyn SearchProvider>] {
        &self.search_providers
    }

    pub fn info_providers(&self) -> &[Arc<dyn InfoProvider>] {
        &self.info_providers
    }

    /// Search providers serving a media type and at least one of the formats
    pub fn select_search_providers(
        &self,
        media_type: MediaType,
        formats: &[MediaFormat],
    ) -> Vec<Arc<dyn SearchProvider>> {
        self.search_providers
            .iter()
            .filter(|provider| {
                let descriptor = provider.descriptor();
                descriptor.provider_type.serves(media_type) && descriptor.supports_any(formats)
            })
            .cloned()
            .collect()
    }

    /// Info providers able to describe a media type, in registration order
    pub fn select_info_providers(&self, media_type: MediaType) -> Vec<Arc<dyn InfoProvider>> {
        self.info_providers
            .iter()
            .filter(|provider| {
                let provider_type = provider.descriptor().provider_type;
                provider_type == ProviderType::Information || provider_type.serves(media_type)
            })
            .cloned()
            .collect()
    }

    /// Every distinct descriptor, search providers first
    pub fn descriptors(&self) -> Vec<&ProviderDescriptor> {
        let mut descriptors: Vec<&ProviderDescriptor> = Vec::new();
        let all = self
            .search_providers
            .iter()
            .map(|p| p.descriptor())
            .chain(self.info_providers.iter().map(|p| p.descriptor()));

        for descriptor in all {
            if !descriptors.iter().any(|d| d.id == descriptor.id) {
                descriptors.push(descriptor);
            }
        }
        descriptors
    }

    /// Provider type recorded on entity mappings for a provider id
    pub fn provider_type_of(&self, provider_id: &str) -> Option<ProviderType> {
        self.search_providers
            .iter()
            .map(|p| p.descriptor())
            .chain(self.info_providers.iter().map(|p| p.descriptor()))
            .find(|d| d.id == provider_id)
            .map(|d| d.provider_type)
    }

    pub fn is_empty(&self) -> bool {
        self.search_providers.is_empty() && self.info_providers.is_empty()
    }
}
