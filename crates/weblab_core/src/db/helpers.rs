//! Row encoding helpers shared by storage modules.

use crate::error::StoreError;
use crate::models::{Collaborator, ProjectRecord, ProjectVersion};
use chrono::{DateTime, Utc};

pub(crate) fn reverse_timestamp_key(created_at: DateTime<Utc>) -> u64 {
    // Pre-epoch timestamps clamp to zero so the subtraction cannot wrap.
    let millis = created_at.timestamp_millis().max(0) as u64;
    u64::MAX.saturating_sub(millis)
}

pub(crate) fn deserialize_project(bytes: &[u8]) -> Result<ProjectRecord, StoreError> {
    Ok(bincode::deserialize(bytes)?)
}

pub(crate) fn deserialize_version(bytes: &[u8]) -> Result<ProjectVersion, StoreError> {
    Ok(bincode::deserialize(bytes)?)
}

pub(crate) fn deserialize_collaborator(bytes: &[u8]) -> Result<Collaborator, StoreError> {
    Ok(bincode::deserialize(bytes)?)
}
