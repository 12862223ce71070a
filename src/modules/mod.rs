pub mod fusion;
pub mod mapping;
pub mod media;
pub mod provider;
