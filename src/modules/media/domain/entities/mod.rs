mod candidate;
mod mapping;
mod media_entity;
mod metadata_items;
mod metadata_patch;
mod reference_record;

pub use candidate::Candidate;
pub use mapping::{Mapping, MediaMapping};
pub use media_entity::MediaEntity;
pub use metadata_items::{Artwork, ArtworkKind, Character, Relation};
pub use metadata_patch::MetadataPatch;
pub use reference_record::ReferenceRecord;
