mod rate_limiter_registry;

pub use rate_limiter_registry::RateLimiterRegistry;
