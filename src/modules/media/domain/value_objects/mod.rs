mod media_kind;
mod media_title;

pub use media_kind::{MediaFormat, MediaStatus, MediaType, Season};
pub use media_title::{MediaTitle, TitleLocale};

/// Placeholder some providers emit instead of leaving a field empty
pub const UNKNOWN: &str = "UNKNOWN";
