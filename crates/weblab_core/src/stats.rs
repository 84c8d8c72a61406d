//! Project counts for the dashboard.

use crate::constants::RECENT_PROJECTS_LIMIT;
use crate::error::StoreError;
use crate::models::{AccountRef, ProjectFilter, ProjectView};
use crate::store::RemoteStore;
use serde::Serialize;

/// Totals over the projects a caller is counted against, plus the newest few.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectStats {
    pub total: usize,
    pub public: usize,
    pub private: usize,
    pub recent: Vec<ProjectView>,
}

/// Signed-in callers are counted against their own projects; anonymous
/// callers against public ones.
///
/// # Errors
/// Propagates store failures.
pub fn collect(
    store: &dyn RemoteStore,
    viewer: Option<&AccountRef>,
) -> Result<ProjectStats, StoreError> {
    let filter = ProjectFilter {
        viewer: viewer.cloned(),
        owned_only: viewer.is_some(),
        limit: None,
    };
    let records = store.list(&filter)?;
    let public = records
        .iter()
        .filter(|record| record.visibility.is_public())
        .count();
    Ok(ProjectStats {
        total: records.len(),
        public,
        private: records.len() - public,
        recent: records
            .iter()
            .take(RECENT_PROJECTS_LIMIT)
            .map(ProjectView::from)
            .collect(),
    })
}
