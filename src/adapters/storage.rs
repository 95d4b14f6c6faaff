use crate::domain::ports::Storage;
use crate::utils::error::{DocsError, Result};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        if path.is_empty() {
            self.base_path.clone()
        } else {
            self.base_path.join(path)
        }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        fs::read(&full_path).map_err(|e| DocsError::io(full_path, e))
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| DocsError::io(parent, e))?;
        }

        fs::write(&full_path, data).map_err(|e| DocsError::io(full_path, e))
    }

    async fn list_dirs(&self, path: &str) -> Result<Vec<String>> {
        let full_path = self.resolve(path);
        if !full_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut dirs = Vec::new();
        for entry in fs::read_dir(&full_path).map_err(|e| DocsError::io(&full_path, e))? {
            let entry = entry.map_err(|e| DocsError::io(&full_path, e))?;
            let is_dir = entry
                .file_type()
                .map_err(|e| DocsError::io(entry.path(), e))?
                .is_dir();
            if is_dir {
                dirs.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(dirs)
    }
}
