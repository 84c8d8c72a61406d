//! Shared constants used across WebLab crates.

/// Default API port for WebLab.
pub const DEFAULT_PORT: u16 = 38420;

/// Default upper bound for the combined size of a project's sources.
pub const DEFAULT_MAX_PROJECT_SIZE: usize = 5 * 1024 * 1024;

/// Delay between the last edit and the next preview recomposition.
pub const DEFAULT_PREVIEW_DEBOUNCE_MS: u64 = 500;

/// Default base URL for CLI/API clients.
pub const DEFAULT_CLI_SERVER_URL: &str = "http://localhost:38420";

/// Query parameter that carries a share token.
pub const SHARE_QUERY_PARAM: &str = "code";

/// Name of the single local persisted record.
pub const LOCAL_RECORD_NAME: &str = "weblab-code";

/// Header carrying the caller's opaque account reference.
pub const ACCOUNT_HEADER: &str = "x-weblab-account";

/// Name given to projects saved without one.
pub const UNTITLED_PROJECT_NAME: &str = "Untitled Project";

/// Fallback stem for exported files.
pub const DEFAULT_EXPORT_STEM: &str = "weblab-project";

/// Number of projects reported as "recent" in statistics.
pub const RECENT_PROJECTS_LIMIT: usize = 5;

/// Default and maximum page sizes for project listings.
pub const DEFAULT_LIST_LIMIT: usize = 50;
/// Hard cap for a single listing request.
pub const MAX_LIST_LIMIT: usize = 200;
