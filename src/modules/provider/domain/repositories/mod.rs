mod info_provider_repo;
mod search_provider_repo;

pub use info_provider_repo::*;
pub use search_provider_repo::*;
