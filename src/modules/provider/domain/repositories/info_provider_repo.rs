use async_trait::async_trait;

use crate::{
    modules::{
        media::{MediaEntity, MetadataPatch},
        provider::domain::value_objects::ProviderDescriptor,
    },
    shared::errors::AppResult,
};

/// Capability of describing an already mapped media
#[async_trait]
pub trait InfoProvider: Send + Sync {
    fn descriptor(&self) -> &ProviderDescriptor;

    /// Metadata for the media, usually looked up through the provider's own mapping
    async fn info(&self, media: &MediaEntity) -> AppResult<Option<MetadataPatch>>;
}
