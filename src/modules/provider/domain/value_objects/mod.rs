mod field_policy;
mod provider_descriptor;

pub use field_policy::{FieldClass, FieldPolicy, MediaField};
pub use provider_descriptor::{ProviderDescriptor, ProviderType};
