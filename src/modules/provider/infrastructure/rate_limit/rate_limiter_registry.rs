//! Explicit per-provider rate limiter registry
//!
//! Every pipeline owns its registry instead of sharing a process-wide map, so
//! two registries never throttle each other.

use dashmap::DashMap;
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use crate::modules::provider::domain::ProviderDescriptor;
use crate::shared::errors::{AppError, AppResult};

type DirectRateLimiter = GovernorRateLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
    governor::middleware::NoOpMiddleware,
>;

/// Rate limiters keyed by provider id
#[derive(Default)]
pub struct RateLimiterRegistry {
    limiters: DashMap<String, Arc<DirectRateLimiter>>,
}

impl RateLimiterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the limiter described by a provider, replacing any previous one
    ///
    /// Providers without a request rate are left unthrottled.
    pub fn register(&self, descriptor: &ProviderDescriptor) -> AppResult<()> {
        let Some(requests_per_second) = descriptor.requests_per_second else {
            self.limiters.remove(&descriptor.id);
            return Ok(());
        };

        let limiter = Self::create_rate_limiter(requests_per_second, descriptor.burst)?;
        self.limiters.insert(descriptor.id.clone(), Arc::new(limiter));
        log::debug!(
            "Rate limiter registered for {}: {} req/s, burst {}",
            descriptor.id,
            requests_per_second,
            descriptor.burst
        );
        Ok(())
    }

    pub fn register_all<'a, I>(&self, descriptors: I) -> AppResult<()>
    where
        I: IntoIterator<Item = &'a ProviderDescriptor>,
    {
        for descriptor in descriptors {
            self.register(descriptor)?;
        }
        Ok(())
    }

    /// Create a rate limiter with specified requests per second and burst capacity
    fn create_rate_limiter(
        requests_per_second: f64,
        burst_size: u32,
    ) -> AppResult<DirectRateLimiter> {
        if !requests_per_second.is_finite() || requests_per_second <= 0.0 {
            return Err(AppError::ConfigError(format!(
                "requests_per_second must be positive, got {}",
                requests_per_second
            )));
        }

        // Convert rate to duration between requests
        let period = Duration::try_from_secs_f64(1.0 / requests_per_second).map_err(|e| {
            AppError::ConfigError(format!(
                "requests_per_second {} gives an unusable period: {}",
                requests_per_second, e
            ))
        })?;
        let burst = NonZeroU32::new(burst_size.max(1)).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(period)
            .ok_or_else(|| {
                AppError::ConfigError(format!("request period too short: {:?}", period))
            })?
            .allow_burst(burst);

        Ok(GovernorRateLimiter::direct(quota))
    }

    /// Wait until the provider may issue another request
    pub async fn acquire(&self, provider_id: &str) {
        // Clone out of the map so no shard lock is held across the await
        let limiter = self.limiters.get(provider_id).map(|entry| Arc::clone(entry.value()));

        if let Some(limiter) = limiter {
            limiter.until_ready().await;
        }
    }

    /// Whether a request would be allowed right now, consuming a cell if so
    pub fn can_request_now(&self, provider_id: &str) -> bool {
        self.limiters
            .get(provider_id)
            .map(|limiter| limiter.check().is_ok())
            .unwrap_or(true)
    }

    pub fn is_throttled(&self, provider_id: &str) -> bool {
        self.limiters.contains_key(provider_id)
    }
}
