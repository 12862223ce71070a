mod media_fusion_service;

pub use media_fusion_service::MediaFusionService;
