use futures::future::join_all;
use std::sync::Arc;
use tokio::time::{timeout, Instant};
use tokio_util::sync::CancellationToken;

use crate::modules::media::{Candidate, ReferenceRecord, TitleLocale};
use crate::modules::provider::{RateLimiterRegistry, SearchProvider, SearchRequest};
use crate::shared::config::MappingConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;

/// Ordered search queries for a provider
///
/// The preferred locale comes first, then english, romaji and native, then
/// the declared synonyms. Blank and repeated titles are dropped.
pub fn search_titles(reference: &ReferenceRecord, preferred: TitleLocale) -> Vec<String> {
    let locales = std::iter::once(preferred).chain(TitleLocale::ALL);
    let mut titles: Vec<String> = Vec::new();

    let ordered = locales
        .filter_map(|locale| reference.title.get(locale))
        .chain(reference.synonyms.iter().map(String::as_str))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    for title in ordered {
        if !titles.iter().any(|t| t == title) {
            titles.push(title.to_string());
        }
    }

    titles
}

/// Fans a reference record out to search providers
///
/// Providers are searched concurrently. Within one provider the queries are
/// tried one after another, each attempt throttled by the provider's limiter
/// and bounded by the search timeout, until one returns candidates.
pub struct SearchOrchestrator {
    limiters: Arc<RateLimiterRegistry>,
    config: Arc<MappingConfig>,
}

impl SearchOrchestrator {
    pub fn new(limiters: Arc<RateLimiterRegistry>, config: Arc<MappingConfig>) -> Self {
        Self { limiters, config }
    }

    /// One candidate list per provider, in provider order
    pub async fn search_media(
        &self,
        reference: &ReferenceRecord,
        providers: &[Arc<dyn SearchProvider>],
    ) -> Vec<Vec<Candidate>> {
        let searches = providers
            .iter()
            .map(|provider| self.search_provider(reference, provider.as_ref()));

        join_all(searches).await
    }

    async fn search_provider(
        &self,
        reference: &ReferenceRecord,
        provider: &dyn SearchProvider,
    ) -> Vec<Candidate> {
        let descriptor = provider.descriptor();

        for query in search_titles(reference, descriptor.preferred_title) {
            match self.attempt(reference, provider, &query).await {
                Ok(candidates) if !candidates.is_empty() => return candidates,
                Ok(_) => continue,
                Err(AppError::Timeout(message)) => {
                    log::warn!("Search timed out: {}", message);
                }
                Err(e) => {
                    log::warn!(
                        "Search for '{}' failed on {}: {}",
                        query,
                        descriptor.id,
                        e
                    );
                }
            }
        }

        Vec::new()
    }

    async fn attempt(
        &self,
        reference: &ReferenceRecord,
        provider: &dyn SearchProvider,
        query: &str,
    ) -> AppResult<Vec<Candidate>> {
        let provider_id = provider.descriptor().id.as_str();
        self.limiters.acquire(provider_id).await;

        let cancel = CancellationToken::new();
        let request = SearchRequest {
            query: query.to_string(),
            format: Some(reference.format).filter(|f| !f.is_empty()),
            year: reference.explicit_year(),
            deadline: Instant::now() + self.config.search_timeout,
            cancel: cancel.clone(),
        };

        LogContext::search_attempt(provider_id, query, None);

        match timeout(self.config.search_timeout, provider.search(request)).await {
            Ok(result) => {
                let candidates = result?.unwrap_or_default();
                LogContext::search_attempt(provider_id, query, Some(candidates.len()));
                Ok(candidates)
            }
            Err(_) => {
                // The search future is already dropped; this stops anything it spawned
                cancel.cancel();
                Err(AppError::Timeout(format!(
                    "'{}' on {} after {:?}",
                    query, provider_id, self.config.search_timeout
                )))
            }
        }
    }
}
