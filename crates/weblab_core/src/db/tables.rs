//! redb table definitions shared by storage modules.

use redb::TableDefinition;

/// File name for the redb database within the configured DB directory.
pub const REDB_FILE_NAME: &str = "data.redb";

/// Canonical project rows (`ProjectRecord`, bincode-encoded).
pub const PROJECTS: TableDefinition<&str, &[u8]> = TableDefinition::new("projects");
/// Creation-order index keyed by reverse-millis then id.
pub const PROJECTS_BY_CREATED: TableDefinition<(u64, &str), ()> =
    TableDefinition::new("projects_by_created");
/// Version rows keyed by project id and version number.
pub const VERSIONS: TableDefinition<(&str, u32), &[u8]> = TableDefinition::new("versions");
/// Collaborator rows keyed by project id and account.
pub const COLLABORATORS: TableDefinition<(&str, &str), &[u8]> =
    TableDefinition::new("collaborators");
/// Named local records (JSON bytes).
pub const LOCAL_STATE: TableDefinition<&str, &[u8]> = TableDefinition::new("local_state");
