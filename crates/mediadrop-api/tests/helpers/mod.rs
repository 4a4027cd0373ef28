//! Test helpers: build the router over a scratch storage root.
//!
//! Run from workspace root: `cargo test -p mediadrop-api`.

pub mod fixtures;

use axum::Router;
use axum_test::TestServer;
use mediadrop_api::setup;
use mediadrop_core::{Config, UploadServerConfig};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const BASE_URL: &str = "http://localhost:8090";

/// Test application: server and owned scratch directory.
pub struct TestApp {
    pub server: TestServer,
    pub root: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Slot directories currently under the storage root
    pub fn slots(&self) -> Vec<String> {
        slots_in(&self.root)
    }

    /// Request path of a public URL returned by the upload endpoint
    pub fn path_of(url: &str) -> String {
        url.strip_prefix(BASE_URL)
            .unwrap_or_else(|| panic!("{url} does not start with {BASE_URL}"))
            .to_string()
    }
}

/// Entries under a storage root; empty when the root is missing.
pub fn slots_in(root: &Path) -> Vec<String> {
    match std::fs::read_dir(root) {
        Ok(entries) => entries
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Setup test app accepting PNG only, in batch mode.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(&[]).await
}

/// Setup test app with extra configuration variables.
pub async fn setup_test_app_with(overrides: &[(&str, &str)]) -> TestApp {
    let (router, root, temp_dir) = setup_test_router(overrides).await;

    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        root,
        _temp_dir: temp_dir,
    }
}

/// Bare router and storage root, for requests sent through `tower::ServiceExt::oneshot`.
pub async fn setup_test_router(overrides: &[(&str, &str)]) -> (Router, PathBuf, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let root = temp_dir.path().join("download");

    let config = create_test_config(&root, overrides);
    let (_state, router) = setup::build_app(config)
        .await
        .expect("Failed to build app");

    (router, root, temp_dir)
}

fn create_test_config(root: &Path, overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("BASE_URL".to_string(), BASE_URL.to_string()),
        ("STORAGE_DIRECTORY".to_string(), root.display().to_string()),
        ("VIRTUAL_DIRECTORY".to_string(), "/download".to_string()),
        ("ACCEPTED_FILE_TYPES".to_string(), "image/png".to_string()),
        ("MAX_SIZE_IN_MB".to_string(), "1".to_string()),
    ]);
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }

    let config = UploadServerConfig::from_lookup(|key| vars.get(key).cloned())
        .expect("Invalid test configuration");
    Config(Box::new(config))
}
