use serde::{Deserialize, Serialize};

use super::Candidate;
use crate::modules::provider::ProviderType;

/// Confirmed link between a reference id and one provider's candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mapping {
    /// Reference id the candidate was resolved against
    pub id: String,
    pub slug: String,
    pub data: Candidate,
    pub similarity: f64,
}

/// Provider entry stored on a media entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMapping {
    /// Provider-local identifier
    pub id: String,
    pub provider_id: String,
    pub provider_type: ProviderType,
    pub similarity: f64,
}
