use async_trait::async_trait;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::{
    modules::{
        media::{Candidate, MediaFormat},
        provider::domain::value_objects::ProviderDescriptor,
    },
    shared::errors::AppResult,
};

/// One search attempt handed to a provider
///
/// `cancel` fires when the attempt's deadline passes so that implementations
/// can abort in-flight work they spawned themselves.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub format: Option<MediaFormat>,
    pub year: Option<i32>,
    pub deadline: Instant,
    pub cancel: CancellationToken,
}

/// Capability of finding candidate records by title
#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn descriptor(&self) -> &ProviderDescriptor;

    /// Search the provider; `Ok(None)` and an empty list both mean no results
    async fn search(&self, request: SearchRequest) -> AppResult<Option<Vec<Candidate>>>;
}
