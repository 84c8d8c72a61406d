use crate::bundle::SourceBundle;
use crate::db::Database;
use crate::models::{AccountRef, ProjectRecord, Visibility};
use tempfile::TempDir;

pub(crate) fn setup_temp_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("db");
    let db = Database::new(db_path.to_str().expect("utf-8 path")).expect("open db");
    (db, temp_dir)
}

pub(crate) fn account(raw: &str) -> AccountRef {
    AccountRef::parse(raw).expect("non-empty account")
}

pub(crate) fn draft(name: &str, visibility: Visibility, owner: Option<&str>) -> ProjectRecord {
    ProjectRecord::new(
        Some(name.to_string()),
        SourceBundle::new(format!("<h1>{}</h1>", name), "h1{}", "console.log(1)"),
        visibility,
        owner.map(account),
    )
}
