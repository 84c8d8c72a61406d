//! Core domain library for WebLab (composition, sharing, storage, session).

/// Project access rules derived from ownership and collaborator permissions.
pub mod access;
/// The editable source triple and its normalization.
pub mod bundle;
/// Preview/export document composition.
pub mod compose;
/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across WebLab crates.
pub mod constants;
/// Database access layer backed by redb.
pub mod db;
/// Environment mutation helpers for tests and tooling.
pub mod env;
/// Error types for storage, decoding, and export.
pub mod error;
/// Single-file and archive export artifacts.
pub mod export;
/// Data models for API requests and persistence.
pub mod models;
/// Debounced preview scheduling.
pub mod preview;
/// Editor session state and the auth-change subscription.
pub mod session;
/// Editor preferences persisted alongside local state.
pub mod settings;
/// Share-link token codec.
pub mod share;
/// Project statistics for dashboards.
pub mod stats;
/// Persistence capability traits.
pub mod store;
/// Compiled-in starter templates.
pub mod templates;
/// Shared text normalization helpers.
pub mod text;

#[cfg(test)]
pub(crate) mod test_support;

pub use bundle::{PartialBundle, SourceBundle};
pub use compose::{compose, compose_preview};
pub use config::Config;
pub use constants::DEFAULT_PORT;
pub use db::Database;
pub use error::{DecodeError, ExportError, StoreError};
pub use session::EditorSession;
pub use settings::EditorSettings;
pub use share::ShareToken;
pub use store::{LocalState, LocalStore, RemoteStore};
