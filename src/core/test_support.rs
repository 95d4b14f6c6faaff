use crate::domain::ports::Storage;
use crate::utils::error::{DocsError, Result};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory `Storage` keyed by `/`-separated paths.
#[derive(Clone, Default)]
pub struct MockStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MockStorage {
    pub async fn with_files(paths: &[&str]) -> Self {
        let storage = Self::default();
        for path in paths {
            storage.files.lock().await.insert(path.to_string(), Vec::new());
        }
        storage
    }

    pub async fn get_file(&self, path: &str) -> Option<String> {
        let files = self.files.lock().await;
        files
            .get(path)
            .map(|data| String::from_utf8_lossy(data).into_owned())
    }
}

impl Storage for MockStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let files = self.files.lock().await;
        files.get(path).cloned().ok_or_else(|| {
            DocsError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            )
        })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let mut files = self.files.lock().await;
        files.insert(path.to_string(), data.to_vec());
        Ok(())
    }

    async fn list_dirs(&self, path: &str) -> Result<Vec<String>> {
        let files = self.files.lock().await;
        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{}/", path)
        };
        let dirs: BTreeSet<String> = files
            .keys()
            .filter_map(|key| key.strip_prefix(&prefix))
            .filter_map(|rest| rest.split_once('/').map(|(dir, _)| dir.to_string()))
            .collect();
        Ok(dirs.into_iter().collect())
    }
}
