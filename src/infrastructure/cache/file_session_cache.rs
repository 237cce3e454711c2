//! Session cache persisted to a JSON file, one file per session id.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use directories::ProjectDirs;
use parking_lot::Mutex;
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::errors::ResolveError;
use crate::domain::ports::SessionCachePort;

/// Session cache shared by every run using the same session id.
///
/// Entries live until the session file is removed. Writes are serialized
/// and each one replaces the file atomically.
pub struct FileSessionCache {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
    write_lock: tokio::sync::Mutex<()>,
}

impl FileSessionCache {
    /// Opens (or starts) the session stored at `path`.
    ///
    /// A missing or unreadable file starts an empty session.
    pub async fn open(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Discarding unreadable session cache");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };

        debug!(path = %path.display(), entries = entries.len(), "Opened session cache");

        Self {
            path,
            entries: Mutex::new(entries),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Opens the session `session_id` in the default cache directory.
    pub async fn for_session(session_id: &str) -> Self {
        Self::open(default_session_path(session_id)).await
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, content: String) -> Result<(), ResolveError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ResolveError::cache_io(format!("failed to create cache dir: {e}")))?;
        }

        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, content)
            .await
            .map_err(|e| ResolveError::cache_io(format!("failed to write session cache: {e}")))?;
        fs::rename(&staging, &self.path)
            .await
            .map_err(|e| ResolveError::cache_io(format!("failed to replace session cache: {e}")))
    }
}

/// Default location of a session file (`<cache dir>/sessions/<id>.json`).
#[must_use]
pub fn default_session_path(session_id: &str) -> PathBuf {
    let file_name = format!("{}.json", sanitize(session_id));
    ProjectDirs::from("com", "sk-ys", "redmine-glightbox").map_or_else(
        || std::env::temp_dir().join("redmine-glightbox").join(&file_name),
        |dirs| dirs.cache_dir().join("sessions").join(&file_name),
    )
}

fn sanitize(session_id: &str) -> String {
    session_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

#[async_trait]
impl SessionCachePort for FileSessionCache {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    async fn set(&self, key: &str, value: String) -> Result<(), ResolveError> {
        // Held until the rename so the newest snapshot is always written last.
        let _guard = self.write_lock.lock().await;
        let content = {
            let mut entries = self.entries.lock();
            entries.insert(key.to_string(), value);
            serde_json::to_string_pretty(&*entries)
                .map_err(|e| ResolveError::cache_io(format!("failed to serialize session cache: {e}")))?
        };

        self.persist(content).await
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }
}
