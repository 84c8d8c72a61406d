//! redb-backed local record.

use super::tables::LOCAL_STATE;
use crate::bundle::SourceBundle;
use crate::constants::LOCAL_RECORD_NAME;
use crate::error::StoreError;
use crate::settings::EditorSettings;
use crate::store::{LocalRecord, LocalState, LocalStore};
use redb::ReadableDatabase;
use std::sync::Arc;

/// Accessor for the single named local record.
pub struct LocalStateDb {
    db: Arc<redb::Database>,
}

impl LocalStateDb {
    /// Initialize the local state table if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, StoreError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(LOCAL_STATE)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Store raw JSON under the record name. Used to seed legacy records.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn save_raw(&self, json: &[u8]) -> Result<(), StoreError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(LOCAL_STATE)?;
            table.insert(LOCAL_RECORD_NAME, json)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl LocalStore for LocalStateDb {
    fn save(&self, bundle: &SourceBundle, settings: &EditorSettings) -> Result<(), StoreError> {
        let encoded = LocalRecord::new(bundle, settings).to_json()?;
        self.save_raw(&encoded)
    }

    fn load(&self) -> Result<Option<LocalState>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LOCAL_STATE)?;
        match table.get(LOCAL_RECORD_NAME)? {
            Some(value) => Ok(Some(LocalRecord::from_json(value.value())?.into_state())),
            None => Ok(None),
        }
    }
}
