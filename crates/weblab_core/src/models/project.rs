//! Project records: the persisted view of a bundle plus metadata.

use super::account::AccountRef;
use crate::bundle::SourceBundle;
use crate::constants::UNTITLED_PROJECT_NAME;
use crate::error::StoreError;
use crate::text::normalize_optional_nonempty;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who may see a project without being its owner or a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn from_is_public(is_public: bool) -> Self {
        if is_public {
            Self::Public
        } else {
            Self::Private
        }
    }

    pub fn is_public(self) -> bool {
        self == Self::Public
    }
}

/// A persisted project. `id` is `None` until the store assigns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: Option<String>,
    pub name: String,
    pub bundle: SourceBundle,
    pub visibility: Visibility,
    pub owner: Option<AccountRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectRecord {
    /// A not-yet-persisted record. Blank names become the untitled default.
    pub fn new(
        name: Option<String>,
        bundle: SourceBundle,
        visibility: Visibility,
        owner: Option<AccountRef>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            name: normalize_project_name(name),
            bundle,
            visibility,
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check the invariants every stored record must satisfy.
    ///
    /// # Errors
    /// [`StoreError::BadRequest`] for an empty name, oversized sources, or a
    /// private record without an owner.
    pub fn validate(&self, max_size: usize) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::BadRequest("Project name is required".to_string()));
        }
        if self.bundle.total_len() > max_size {
            return Err(StoreError::BadRequest(format!(
                "Project size exceeds maximum of {} bytes",
                max_size
            )));
        }
        if self.visibility == Visibility::Private && self.owner.is_none() {
            return Err(StoreError::BadRequest(
                "You need to sign in to save private projects".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_owned_by(&self, account: Option<&AccountRef>) -> bool {
        matches!((&self.owner, account), (Some(owner), Some(account)) if owner == account)
    }
}

/// Trim a requested name, falling back to the untitled default.
pub fn normalize_project_name(name: Option<String>) -> String {
    normalize_optional_nonempty(name).unwrap_or_else(|| UNTITLED_PROJECT_NAME.to_string())
}

/// Which records a listing returns.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// Signed-in viewer; `None` lists public projects only.
    pub viewer: Option<AccountRef>,
    /// Restrict to projects owned by `viewer`.
    pub owned_only: bool,
    /// Maximum rows; `None` is unbounded.
    pub limit: Option<usize>,
}

impl ProjectFilter {
    /// Whether `record` is listed for this filter.
    pub fn admits(&self, record: &ProjectRecord) -> bool {
        let owned = record.is_owned_by(self.viewer.as_ref());
        if self.owned_only {
            return owned;
        }
        record.visibility.is_public() || owned
    }
}

/// Wire shape of a project (`html`/`css`/`js`, `is_public`, `user_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectView {
    pub id: String,
    pub name: String,
    pub html: String,
    pub css: String,
    pub js: String,
    pub is_public: bool,
    pub user_id: Option<AccountRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ProjectRecord> for ProjectView {
    fn from(value: &ProjectRecord) -> Self {
        Self {
            id: value.id.clone().unwrap_or_default(),
            name: value.name.clone(),
            html: value.bundle.markup.clone(),
            css: value.bundle.style.clone(),
            js: value.bundle.script.clone(),
            is_public: value.visibility.is_public(),
            user_id: value.owner.clone(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Request payload for creating a project.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: Option<String>,
    pub html: Option<String>,
    pub css: Option<String>,
    pub js: Option<String>,
    pub is_public: Option<bool>,
}

/// Request payload for updating a project. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub html: Option<String>,
    pub css: Option<String>,
    pub js: Option<String>,
    pub is_public: Option<bool>,
}

impl UpdateProjectRequest {
    /// Apply present fields to `record`. Ownership is never changed here.
    pub fn apply_to(&self, record: &mut ProjectRecord) {
        if let Some(name) = &self.name {
            record.name = normalize_project_name(Some(name.clone()));
        }
        if let Some(html) = &self.html {
            record.bundle.markup = html.clone();
        }
        if let Some(css) = &self.css {
            record.bundle.style = css.clone();
        }
        if let Some(js) = &self.js {
            record.bundle.script = js.clone();
        }
        if let Some(is_public) = self.is_public {
            record.visibility = Visibility::from_is_public(is_public);
        }
    }
}

/// Query parameters for listing projects.
#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub mine: Option<bool>,
    pub limit: Option<usize>,
}
