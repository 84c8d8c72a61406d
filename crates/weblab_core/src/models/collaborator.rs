//! Collaborator records. Access-control metadata only; no live co-editing.

use super::account::AccountRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Permission level granted to a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    View,
    Edit,
    Admin,
}

impl Permission {
    pub fn can_edit(self) -> bool {
        self >= Self::Edit
    }

    pub fn can_manage(self) -> bool {
        self == Self::Admin
    }
}

/// Grant of `permission` on `project_id` to `user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collaborator {
    pub project_id: String,
    pub user_id: AccountRef,
    #[serde(rename = "permission_level")]
    pub permission: Permission,
    pub created_at: DateTime<Utc>,
}

/// Request payload for adding a collaborator.
#[derive(Debug, Deserialize)]
pub struct AddCollaboratorRequest {
    pub user_id: String,
    pub permission_level: Permission,
}

/// Request payload for changing a collaborator's permission.
#[derive(Debug, Deserialize)]
pub struct UpdatePermissionRequest {
    pub permission_level: Permission,
}
