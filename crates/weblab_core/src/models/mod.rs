//! Data models for persistence and the HTTP API.

/// Opaque account references.
pub mod account;
/// Collaborator access-control records.
pub mod collaborator;
/// Project records, requests, and listing filters.
pub mod project;
/// Project version history.
pub mod version;

pub use account::AccountRef;
pub use collaborator::{Collaborator, Permission};
pub use project::{ProjectFilter, ProjectRecord, ProjectView, Visibility};
pub use version::{ProjectVersion, VersionView};
