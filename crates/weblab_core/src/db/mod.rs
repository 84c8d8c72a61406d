//! Database layer for WebLab backed by redb.

/// Collaborator storage helpers.
pub mod collaborator;
mod helpers;
/// Local record storage.
pub mod local;
/// Project storage helpers.
pub mod project;
/// redb table definitions.
pub mod tables;
/// Version history storage.
pub mod version;

use crate::constants::DEFAULT_MAX_PROJECT_SIZE;
use crate::error::StoreError;
use crate::models::{ProjectFilter, ProjectRecord};
use crate::store::RemoteStore;
use std::path::Path;
use std::sync::Arc;

pub use collaborator::CollaboratorDb;
pub use local::LocalStateDb;
pub use project::ProjectDb;
pub use version::VersionDb;

/// Database handle with access to every WebLab table.
pub struct Database {
    pub db: Arc<redb::Database>,
    pub projects: ProjectDb,
    pub versions: VersionDb,
    pub collaborators: CollaboratorDb,
    pub local: LocalStateDb,
}

#[cfg(test)]
mod tests;

impl Database {
    /// Build a handle over an already-open redb instance.
    ///
    /// # Errors
    /// Returns an error when table initialization fails.
    pub fn from_shared(db: Arc<redb::Database>, max_project_size: usize) -> Result<Self, StoreError> {
        Ok(Self {
            projects: ProjectDb::new(db.clone(), max_project_size)?,
            versions: VersionDb::new(db.clone())?,
            collaborators: CollaboratorDb::new(db.clone())?,
            local: LocalStateDb::new(db.clone())?,
            db,
        })
    }

    /// Open (or create) the database in directory `path` with the default
    /// project size limit.
    ///
    /// # Errors
    /// Returns an error when the directory or redb file cannot be opened.
    pub fn new(path: &str) -> Result<Self, StoreError> {
        Self::with_max_project_size(path, DEFAULT_MAX_PROJECT_SIZE)
    }

    /// Open (or create) the database in directory `path`.
    ///
    /// # Arguments
    /// - `path`: Directory that holds `data.redb`; created when missing.
    /// - `max_project_size`: Largest combined source size accepted on save.
    ///
    /// # Returns
    /// A [`Database`] with every table initialized.
    ///
    /// # Errors
    /// Returns an error when the directory or redb file cannot be opened.
    pub fn with_max_project_size(path: &str, max_project_size: usize) -> Result<Self, StoreError> {
        let dir = Path::new(path);
        std::fs::create_dir_all(dir).map_err(|err| {
            StoreError::Storage(format!(
                "Failed to create database directory '{}': {}",
                dir.display(),
                err
            ))
        })?;
        let file = dir.join(tables::REDB_FILE_NAME);
        let db = redb::Database::create(&file).map_err(|err| {
            StoreError::Storage(format!(
                "Failed to open database '{}': {}. Is another WebLab server using it? \
                 Set DB_PATH to use a different location.",
                file.display(),
                err
            ))
        })?;
        tracing::debug!("Opened database at {}", file.display());
        Self::from_shared(Arc::new(db), max_project_size)
    }
}

impl RemoteStore for Database {
    fn save(&self, record: ProjectRecord) -> Result<ProjectRecord, StoreError> {
        self.projects.save(record)
    }

    fn get(&self, id: &str) -> Result<Option<ProjectRecord>, StoreError> {
        self.projects.get(id)
    }

    fn list(&self, filter: &ProjectFilter) -> Result<Vec<ProjectRecord>, StoreError> {
        self.projects.list(filter)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        if self.projects.delete(id)? {
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }
}
