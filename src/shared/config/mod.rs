mod mapping_config;

pub use mapping_config::{MappingConfig, MappingConfigBuilder};
