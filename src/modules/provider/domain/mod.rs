pub mod repositories;
pub mod value_objects;

// Re-exports for easy access
pub use repositories::{InfoProvider, SearchProvider, SearchRequest};
pub use value_objects::{FieldClass, FieldPolicy, MediaField, ProviderDescriptor, ProviderType};
