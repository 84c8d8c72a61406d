//! Who may do what with a project.
//!
//! Rules: anyone may view a public project; owners may do everything;
//! collaborators act according to their [`Permission`]. A record without an
//! owner is open to view, edit, and delete, but nobody manages its
//! collaborators.

use crate::db::Database;
use crate::error::StoreError;
use crate::models::{AccountRef, Permission, ProjectRecord};

/// Resolved rights of one caller on one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    public: bool,
    owner: bool,
    ownerless: bool,
    permission: Option<Permission>,
}

impl Access {
    pub fn can_view(self) -> bool {
        self.public || self.owner || self.ownerless || self.permission.is_some()
    }

    pub fn can_edit(self) -> bool {
        self.owner || self.ownerless || self.permission.is_some_and(Permission::can_edit)
    }

    /// Manage collaborators.
    pub fn can_manage(self) -> bool {
        self.owner || self.permission.is_some_and(Permission::can_manage)
    }

    pub fn can_delete(self) -> bool {
        self.owner || self.ownerless
    }

    pub fn is_owner(self) -> bool {
        self.owner
    }
}

/// Combine ownership and a collaborator grant into an [`Access`].
pub fn resolve_access(
    record: &ProjectRecord,
    viewer: Option<&AccountRef>,
    permission: Option<Permission>,
) -> Access {
    Access {
        public: record.visibility.is_public(),
        owner: record.is_owned_by(viewer),
        ownerless: record.owner.is_none(),
        permission: viewer.and(permission),
    }
}

/// Resolve access, looking up the caller's collaborator grant in `db`.
///
/// # Errors
/// Returns an error when the collaborator lookup fails.
pub fn access_for(
    db: &Database,
    record: &ProjectRecord,
    viewer: Option<&AccountRef>,
) -> Result<Access, StoreError> {
    let permission = match record.id.as_deref() {
        Some(id) => db.collaborators.permission_of(id, viewer)?,
        None => None,
    };
    Ok(resolve_access(record, viewer, permission))
}
