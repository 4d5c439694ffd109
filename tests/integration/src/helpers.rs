//! Test helpers for integration tests
//!
//! Provides a server spawned on an ephemeral port, backed by the in-memory
//! repositories and a temporary upload directory.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;

use anyhow::Result;
use estate_api::{create_app, create_app_state, serve};
use estate_client::EstateClient;
use estate_common::AppConfig;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Test server instance that manages lifecycle
///
/// The server task is aborted and the upload directory removed on drop.
pub struct TestServer {
    pub addr: SocketAddr,
    uploads: TempDir,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server with the in-memory backend
    pub async fn start() -> Result<Self> {
        Self::start_with(HashMap::new()).await
    }

    /// Start a server, overriding configuration keys
    pub async fn start_with(overrides: HashMap<&'static str, String>) -> Result<Self> {
        let uploads = tempfile::tempdir()?;
        let config = test_config(uploads.path(), &overrides)?;

        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            uploads,
            handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// New client without a token
    pub fn client(&self) -> EstateClient {
        EstateClient::with_http_client(self.base_url(), reqwest::Client::new())
    }

    /// Directory uploads are written to
    pub fn upload_dir(&self) -> &Path {
        self.uploads.path()
    }

    /// Whether a stored upload exists on disk
    pub fn has_upload(&self, file_name: &str) -> bool {
        self.upload_dir().join(file_name).is_file()
    }

    /// Number of entries in the upload directory, partial files included
    pub fn upload_count(&self) -> usize {
        std::fs::read_dir(self.upload_dir()).map_or(0, |entries| entries.count())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Configuration for an in-memory server writing uploads into `upload_dir`
pub fn test_config(
    upload_dir: &Path,
    overrides: &HashMap<&'static str, String>,
) -> Result<AppConfig> {
    let upload_dir = upload_dir.to_string_lossy().into_owned();

    let config = AppConfig::from_lookup(|key| {
        if let Some(value) = overrides.get(key) {
            return Some(value.clone());
        }
        match key {
            "DATABASE_URL" => Some("memory://".to_string()),
            "JWT_SECRET" => Some("integration-test-secret".to_string()),
            "UPLOAD_DIRECTORY" => Some(upload_dir.clone()),
            "RATE_LIMIT_REQUESTS_PER_SECOND" => Some("1000".to_string()),
            "RATE_LIMIT_BURST" => Some("1000".to_string()),
            _ => None,
        }
    })
    .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    Ok(config)
}
