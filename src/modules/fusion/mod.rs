pub mod application;
pub mod domain;

pub use application::MediaFusionService;
pub use domain::services::{average_metric, fill_media_info, try_fill_media_info};
