//! Project version history.

use crate::bundle::SourceBundle;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One committed snapshot of a project's sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectVersion {
    pub project_id: String,
    /// Starts at 1 and increases by one per commit.
    pub version_number: u32,
    pub bundle: SourceBundle,
    pub commit_message: String,
    pub created_at: DateTime<Utc>,
}

/// Wire shape of a version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionView {
    pub project_id: String,
    pub version_number: u32,
    pub html: String,
    pub css: String,
    pub js: String,
    pub commit_message: String,
    pub created_at: DateTime<Utc>,
}

impl From<&ProjectVersion> for VersionView {
    fn from(value: &ProjectVersion) -> Self {
        Self {
            project_id: value.project_id.clone(),
            version_number: value.version_number,
            html: value.bundle.markup.clone(),
            css: value.bundle.style.clone(),
            js: value.bundle.script.clone(),
            commit_message: value.commit_message.clone(),
            created_at: value.created_at,
        }
    }
}

/// Request payload for committing a version.
///
/// Omitted sources are taken from the project's current state.
#[derive(Debug, Deserialize, Default)]
pub struct CommitVersionRequest {
    pub html: Option<String>,
    pub css: Option<String>,
    pub js: Option<String>,
    #[serde(default)]
    pub commit_message: String,
}
