//! Project storage operations backed by redb.

use super::helpers::{deserialize_project, reverse_timestamp_key};
use super::tables::{COLLABORATORS, PROJECTS, PROJECTS_BY_CREATED, VERSIONS};
use crate::error::StoreError;
use crate::models::project::normalize_project_name;
use crate::models::{ProjectFilter, ProjectRecord};
use chrono::Utc;
use redb::{ReadableDatabase, ReadableTable};
use std::sync::Arc;

/// Accessor for project tables.
pub struct ProjectDb {
    db: Arc<redb::Database>,
    max_project_size: usize,
}

impl ProjectDb {
    /// Initialize project tables if they do not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>, max_project_size: usize) -> Result<Self, StoreError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(PROJECTS)?;
        write_txn.open_table(PROJECTS_BY_CREATED)?;
        write_txn.commit()?;
        Ok(Self {
            db,
            max_project_size,
        })
    }

    pub fn max_project_size(&self) -> usize {
        self.max_project_size
    }

    /// Insert a record without an id, or update the stored one.
    ///
    /// # Returns
    /// The record as stored, with its id assigned.
    ///
    /// # Errors
    /// [`StoreError::BadRequest`] on validation failure, [`StoreError::NotFound`]
    /// when updating a missing id, or a storage error.
    pub fn save(&self, record: ProjectRecord) -> Result<ProjectRecord, StoreError> {
        match record.id.clone() {
            Some(id) => self.update(&id, record),
            None => self.insert(record),
        }
    }

    fn insert(&self, mut record: ProjectRecord) -> Result<ProjectRecord, StoreError> {
        let id = uuid::Uuid::new_v4().to_string();
        record.id = Some(id.clone());
        record.name = normalize_project_name(Some(record.name));
        record.validate(self.max_project_size)?;

        let encoded = bincode::serialize(&record)?;
        let created_key = reverse_timestamp_key(record.created_at);

        let write_txn = self.db.begin_write()?;
        {
            let mut projects = write_txn.open_table(PROJECTS)?;
            let mut created = write_txn.open_table(PROJECTS_BY_CREATED)?;

            if projects.get(id.as_str())?.is_some() {
                return Err(StoreError::Conflict(format!(
                    "Project id '{}' already exists",
                    id
                )));
            }

            projects.insert(id.as_str(), encoded.as_slice())?;
            created.insert((created_key, id.as_str()), ())?;
        }
        write_txn.commit()?;
        tracing::debug!(project_id = %id, "Inserted project");
        Ok(record)
    }

    fn update(&self, id: &str, incoming: ProjectRecord) -> Result<ProjectRecord, StoreError> {
        let write_txn = self.db.begin_write()?;
        let stored = {
            let mut projects = write_txn.open_table(PROJECTS)?;

            let Some(old_guard) = projects.get(id)? else {
                return Err(StoreError::NotFound);
            };
            let mut record = deserialize_project(old_guard.value())?;
            drop(old_guard);

            record.name = normalize_project_name(Some(incoming.name));
            record.bundle = incoming.bundle;
            record.visibility = incoming.visibility;
            record.updated_at = Utc::now();
            record.validate(self.max_project_size)?;

            let encoded = bincode::serialize(&record)?;
            projects.insert(id, encoded.as_slice())?;
            record
        };
        write_txn.commit()?;
        Ok(stored)
    }

    /// Fetch a project by id.
    ///
    /// # Returns
    /// `Ok(Some(record))` when found, `Ok(None)` when missing.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn get(&self, id: &str) -> Result<Option<ProjectRecord>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let projects = read_txn.open_table(PROJECTS)?;
        match projects.get(id)? {
            Some(value) => Ok(Some(deserialize_project(value.value())?)),
            None => Ok(None),
        }
    }

    /// List projects admitted by `filter`, newest first.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn list(&self, filter: &ProjectFilter) -> Result<Vec<ProjectRecord>, StoreError> {
        if filter.limit == Some(0) {
            return Ok(Vec::new());
        }

        let read_txn = self.db.begin_read()?;
        let created_table = read_txn.open_table(PROJECTS_BY_CREATED)?;
        let projects_table = read_txn.open_table(PROJECTS)?;
        let mut records = Vec::new();

        for item in created_table.iter()? {
            let (key, _) = item?;
            let (_, project_id) = key.value();
            let Some(guard) = projects_table.get(project_id)? else {
                continue;
            };
            let record = deserialize_project(guard.value())?;
            if !filter.admits(&record) {
                continue;
            }
            records.push(record);
            if filter.limit.is_some_and(|limit| records.len() >= limit) {
                break;
            }
        }

        Ok(records)
    }

    /// Delete a project along with its versions and collaborators.
    ///
    /// # Returns
    /// `true` when a project was deleted, `false` when it did not exist.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut projects = write_txn.open_table(PROJECTS)?;
            let mut created = write_txn.open_table(PROJECTS_BY_CREATED)?;
            let mut versions = write_txn.open_table(VERSIONS)?;
            let mut collaborators = write_txn.open_table(COLLABORATORS)?;

            let Some(old_guard) = projects.get(id)? else {
                return Ok(false);
            };
            let record = deserialize_project(old_guard.value())?;
            drop(old_guard);

            let mut version_numbers = Vec::new();
            for item in versions.range((id, 0u32)..=(id, u32::MAX))? {
                let (key, _) = item?;
                version_numbers.push(key.value().1);
            }
            for number in version_numbers {
                let _ = versions.remove((id, number))?;
            }

            let mut collaborator_ids = Vec::new();
            for item in collaborators.range((id, "")..)? {
                let (key, _) = item?;
                let (project_id, user_id) = key.value();
                if project_id != id {
                    break;
                }
                collaborator_ids.push(user_id.to_string());
            }
            for user_id in &collaborator_ids {
                let _ = collaborators.remove((id, user_id.as_str()))?;
            }

            let _ = created.remove((reverse_timestamp_key(record.created_at), id))?;
            let _ = projects.remove(id)?;
        }
        write_txn.commit()?;
        tracing::debug!(project_id = %id, "Deleted project");
        Ok(true)
    }
}
