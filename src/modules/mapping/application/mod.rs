pub mod mapping_service;
pub mod search_orchestrator;

pub use mapping_service::MappingService;
pub use search_orchestrator::{search_titles, SearchOrchestrator};
