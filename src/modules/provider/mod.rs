pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use domain::{
    FieldClass, FieldPolicy, InfoProvider, MediaField, ProviderDescriptor, ProviderType,
    SearchProvider, SearchRequest,
};
pub use infrastructure::{ProviderRegistry, RateLimiterRegistry};
