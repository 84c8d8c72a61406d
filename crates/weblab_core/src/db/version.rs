//! Version history storage.

use super::helpers::deserialize_version;
use super::tables::{PROJECTS, VERSIONS};
use crate::bundle::SourceBundle;
use crate::error::StoreError;
use crate::models::ProjectVersion;
use chrono::Utc;
use redb::{ReadableDatabase, ReadableTable};
use std::sync::Arc;

/// Accessor for the versions table.
pub struct VersionDb {
    db: Arc<redb::Database>,
}

impl VersionDb {
    /// Initialize the versions table if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, StoreError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(VERSIONS)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Record a snapshot as the project's next version (`latest + 1`).
    ///
    /// # Errors
    /// [`StoreError::NotFound`] when the project does not exist.
    pub fn commit(
        &self,
        project_id: &str,
        bundle: SourceBundle,
        commit_message: &str,
    ) -> Result<ProjectVersion, StoreError> {
        let write_txn = self.db.begin_write()?;
        let version = {
            let projects = write_txn.open_table(PROJECTS)?;
            if projects.get(project_id)?.is_none() {
                return Err(StoreError::NotFound);
            }
            let mut versions = write_txn.open_table(VERSIONS)?;

            let latest = match versions
                .range((project_id, 0u32)..=(project_id, u32::MAX))?
                .next_back()
            {
                Some(item) => item?.0.value().1,
                None => 0,
            };

            let version = ProjectVersion {
                project_id: project_id.to_string(),
                version_number: latest + 1,
                bundle,
                commit_message: commit_message.trim().to_string(),
                created_at: Utc::now(),
            };
            let encoded = bincode::serialize(&version)?;
            versions.insert((project_id, version.version_number), encoded.as_slice())?;
            version
        };
        write_txn.commit()?;
        Ok(version)
    }

    /// All versions of a project, newest first.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn list(&self, project_id: &str) -> Result<Vec<ProjectVersion>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let versions = read_txn.open_table(VERSIONS)?;
        let mut found = Vec::new();
        for item in versions
            .range((project_id, 0u32)..=(project_id, u32::MAX))?
            .rev()
        {
            let (_, value) = item?;
            found.push(deserialize_version(value.value())?);
        }
        Ok(found)
    }

    pub fn get(
        &self,
        project_id: &str,
        version_number: u32,
    ) -> Result<Option<ProjectVersion>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let versions = read_txn.open_table(VERSIONS)?;
        match versions.get((project_id, version_number))? {
            Some(value) => Ok(Some(deserialize_version(value.value())?)),
            None => Ok(None),
        }
    }
}
