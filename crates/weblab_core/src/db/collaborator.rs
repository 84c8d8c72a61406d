//! Collaborator storage. Records grant access; nothing here syncs edits.

use super::helpers::{deserialize_collaborator, deserialize_project};
use super::tables::{COLLABORATORS, PROJECTS};
use crate::error::StoreError;
use crate::models::{AccountRef, Collaborator, Permission};
use chrono::Utc;
use redb::{ReadableDatabase, ReadableTable};
use std::sync::Arc;

/// Accessor for the collaborators table.
pub struct CollaboratorDb {
    db: Arc<redb::Database>,
}

impl CollaboratorDb {
    /// Initialize the collaborators table if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, StoreError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(COLLABORATORS)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Grant `permission` on a project to `user_id`.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] for a missing project, [`StoreError::BadRequest`]
    /// when `user_id` owns the project, [`StoreError::Conflict`] when the
    /// account is already a collaborator.
    pub fn add(
        &self,
        project_id: &str,
        user_id: &AccountRef,
        permission: Permission,
    ) -> Result<Collaborator, StoreError> {
        let write_txn = self.db.begin_write()?;
        let collaborator = {
            let projects = write_txn.open_table(PROJECTS)?;
            let Some(project_guard) = projects.get(project_id)? else {
                return Err(StoreError::NotFound);
            };
            let project = deserialize_project(project_guard.value())?;
            drop(project_guard);
            if project.owner.as_ref() == Some(user_id) {
                return Err(StoreError::BadRequest(
                    "The project owner cannot be added as a collaborator".to_string(),
                ));
            }

            let mut collaborators = write_txn.open_table(COLLABORATORS)?;
            if collaborators
                .get((project_id, user_id.as_str()))?
                .is_some()
            {
                return Err(StoreError::Conflict(format!(
                    "'{}' is already a collaborator on this project",
                    user_id
                )));
            }

            let collaborator = Collaborator {
                project_id: project_id.to_string(),
                user_id: user_id.clone(),
                permission,
                created_at: Utc::now(),
            };
            let encoded = bincode::serialize(&collaborator)?;
            collaborators.insert((project_id, user_id.as_str()), encoded.as_slice())?;
            collaborator
        };
        write_txn.commit()?;
        Ok(collaborator)
    }

    /// Collaborators of a project, oldest grant first.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn list(&self, project_id: &str) -> Result<Vec<Collaborator>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let collaborators = read_txn.open_table(COLLABORATORS)?;
        let mut found = Vec::new();
        for item in collaborators.range((project_id, "")..)? {
            let (key, value) = item?;
            if key.value().0 != project_id {
                break;
            }
            found.push(deserialize_collaborator(value.value())?);
        }
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(found)
    }

    pub fn get(
        &self,
        project_id: &str,
        user_id: &AccountRef,
    ) -> Result<Option<Collaborator>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let collaborators = read_txn.open_table(COLLABORATORS)?;
        match collaborators.get((project_id, user_id.as_str()))? {
            Some(value) => Ok(Some(deserialize_collaborator(value.value())?)),
            None => Ok(None),
        }
    }

    /// Permission held by `user_id`, if any. Anonymous callers hold none.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn permission_of(
        &self,
        project_id: &str,
        user_id: Option<&AccountRef>,
    ) -> Result<Option<Permission>, StoreError> {
        let Some(user_id) = user_id else {
            return Ok(None);
        };
        Ok(self.get(project_id, user_id)?.map(|c| c.permission))
    }

    /// Change a collaborator's permission level.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] when the account is not a collaborator.
    pub fn set_permission(
        &self,
        project_id: &str,
        user_id: &AccountRef,
        permission: Permission,
    ) -> Result<Collaborator, StoreError> {
        let write_txn = self.db.begin_write()?;
        let updated = {
            let mut collaborators = write_txn.open_table(COLLABORATORS)?;
            let Some(guard) = collaborators.get((project_id, user_id.as_str()))? else {
                return Err(StoreError::NotFound);
            };
            let mut collaborator = deserialize_collaborator(guard.value())?;
            drop(guard);

            collaborator.permission = permission;
            let encoded = bincode::serialize(&collaborator)?;
            collaborators.insert((project_id, user_id.as_str()), encoded.as_slice())?;
            collaborator
        };
        write_txn.commit()?;
        Ok(updated)
    }

    /// Revoke a collaborator.
    ///
    /// # Returns
    /// `true` when a grant was removed.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn remove(&self, project_id: &str, user_id: &AccountRef) -> Result<bool, StoreError> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut collaborators = write_txn.open_table(COLLABORATORS)?;
            let previous = collaborators.remove((project_id, user_id.as_str()))?;
            previous.is_some()
        };
        write_txn.commit()?;
        Ok(removed)
    }
}
