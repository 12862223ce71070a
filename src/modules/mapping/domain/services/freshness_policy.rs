use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest released episode or chapter known from one source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreshnessSnapshot {
    pub latest: f64,
    pub updated_at: Option<DateTime<Utc>>,
}

impl FreshnessSnapshot {
    pub fn new(latest: f64, updated_at: Option<DateTime<Utc>>) -> Self {
        Self { latest, updated_at }
    }
}

/// Whether an incoming snapshot should replace the current one
///
/// A strictly higher episode number always wins, timestamp or not. An equal
/// number only wins with a strictly newer timestamp on both sides.
pub fn should_accept_update(current: &FreshnessSnapshot, incoming: &FreshnessSnapshot) -> bool {
    if !incoming.latest.is_finite() {
        return false;
    }
    if !current.latest.is_finite() || incoming.latest > current.latest {
        return true;
    }
    if incoming.latest < current.latest {
        return false;
    }

    match (current.updated_at, incoming.updated_at) {
        (Some(current_at), Some(incoming_at)) => incoming_at > current_at,
        (None, Some(_)) => true,
        _ => false,
    }
}
