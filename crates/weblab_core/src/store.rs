//! Persistence capabilities the editor session depends on.
//!
//! [`LocalStore`] holds the single browser-local record; [`RemoteStore`]
//! holds account-scoped projects. The redb-backed implementations live in
//! [`crate::db`].

use crate::bundle::{PartialBundle, SourceBundle};
use crate::error::StoreError;
use crate::models::{ProjectFilter, ProjectRecord};
use crate::settings::EditorSettings;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Sources and preferences restored from the local record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalState {
    pub bundle: SourceBundle,
    pub settings: EditorSettings,
}

/// Storage for the single local record.
pub trait LocalStore: Send + Sync {
    /// Overwrite the local record.
    fn save(&self, bundle: &SourceBundle, settings: &EditorSettings) -> Result<(), StoreError>;

    /// Read the local record, or `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<LocalState>, StoreError>;
}

/// Storage for persisted projects.
pub trait RemoteStore: Send + Sync {
    /// Insert when `record.id` is `None`, update otherwise.
    ///
    /// Updates never change the owner or creation time.
    fn save(&self, record: ProjectRecord) -> Result<ProjectRecord, StoreError>;

    fn get(&self, id: &str) -> Result<Option<ProjectRecord>, StoreError>;

    /// Records admitted by `filter`, newest first.
    fn list(&self, filter: &ProjectFilter) -> Result<Vec<ProjectRecord>, StoreError>;

    /// Delete a project with its versions and collaborators.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] when no project has this id.
    fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// JSON shape of the local record. Every field is optional on read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalRecord {
    #[serde(default, alias = "html", skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
    #[serde(default, alias = "css", skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, alias = "js", skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_refresh: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_theme: Option<String>,
}

impl LocalRecord {
    pub fn new(bundle: &SourceBundle, settings: &EditorSettings) -> Self {
        Self {
            markup: Some(bundle.markup.clone()),
            style: Some(bundle.style.clone()),
            script: Some(bundle.script.clone()),
            auto_refresh: Some(settings.auto_refresh),
            font_size: Some(settings.font_size),
            editor_theme: Some(settings.editor_theme.clone()),
        }
    }

    /// Resolve absent fields to empty sources and default settings.
    pub fn into_state(self) -> LocalState {
        let defaults = EditorSettings::default();
        let bundle = PartialBundle {
            markup: self.markup,
            style: self.style,
            script: self.script,
        }
        .normalize();
        LocalState {
            bundle,
            settings: EditorSettings {
                auto_refresh: self.auto_refresh.unwrap_or(defaults.auto_refresh),
                font_size: self.font_size.unwrap_or(defaults.font_size),
                editor_theme: self
                    .editor_theme
                    .filter(|theme| !theme.trim().is_empty())
                    .unwrap_or(defaults.editor_theme),
            },
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, StoreError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, StoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// In-process [`LocalStore`] keeping the record as JSON.
#[derive(Debug, Default)]
pub struct MemoryLocalStore {
    record: Mutex<Option<Vec<u8>>>,
}

impl MemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with raw JSON, as another client might have left it.
    pub fn with_raw(json: impl Into<Vec<u8>>) -> Self {
        Self {
            record: Mutex::new(Some(json.into())),
        }
    }
}

impl LocalStore for MemoryLocalStore {
    fn save(&self, bundle: &SourceBundle, settings: &EditorSettings) -> Result<(), StoreError> {
        let encoded = LocalRecord::new(bundle, settings).to_json()?;
        let mut slot = self
            .record
            .lock()
            .map_err(|_| StoreError::Storage("Local store lock poisoned".to_string()))?;
        *slot = Some(encoded);
        Ok(())
    }

    fn load(&self) -> Result<Option<LocalState>, StoreError> {
        let slot = self
            .record
            .lock()
            .map_err(|_| StoreError::Storage("Local store lock poisoned".to_string()))?;
        match slot.as_deref() {
            Some(bytes) => Ok(Some(LocalRecord::from_json(bytes)?.into_state())),
            None => Ok(None),
        }
    }
}
