pub mod rate_limit;
pub mod registry;

pub use rate_limit::RateLimiterRegistry;
pub use registry::ProviderRegistry;
