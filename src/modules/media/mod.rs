pub mod domain;

// Re-exports for easy external access
pub use domain::entities::{
    Artwork, Candidate, Character, Mapping, MediaEntity, MediaMapping, MetadataPatch,
    ReferenceRecord, Relation,
};
pub use domain::value_objects::{
    MediaFormat, MediaStatus, MediaTitle, MediaType, Season, TitleLocale, UNKNOWN,
};
