//! Shared integration-test server bootstrap helpers.

#![allow(dead_code)]

use axum_test::TestServer;
use std::path::Path;
use tempfile::TempDir;
use weblab_server::{create_app, AppState, Config, Database};

pub(crate) const TEST_ORIGIN: &str = "http://lab.test";
pub(crate) const ACCOUNT: &str = "x-weblab-account";

pub(crate) fn test_config_for_db_path(db_path: &Path) -> Config {
    Config {
        port: 0,
        db_path: db_path.to_str().expect("db path").to_string(),
        max_project_size: 64 * 1024,
        preview_debounce_ms: 500,
        public_origin: TEST_ORIGIN.to_string(),
    }
}

pub(crate) fn test_server_for_config(config: Config) -> TestServer {
    let db = Database::with_max_project_size(config.db_path.as_str(), config.max_project_size)
        .expect("open db");
    let state = AppState::new(config, db);
    let app = create_app(state, false);
    TestServer::new(app).expect("server")
}

pub(crate) fn setup_test_server() -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("test.db");
    let config = test_config_for_db_path(&db_path);
    (test_server_for_config(config), temp_dir)
}
