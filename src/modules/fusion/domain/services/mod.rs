mod field_fusion;

pub use field_fusion::{average_metric, fill_media_info, try_fill_media_info};
