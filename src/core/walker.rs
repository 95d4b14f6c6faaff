use crate::domain::model::{DocumentEntry, ModuleKey};
use crate::utils::error::{DocsError, Result};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// `root/*.md` and `root/<module>/*.md`; anything deeper is incidental.
const MAX_DEPTH: usize = 2;

pub struct TreeWalker {
    root: PathBuf,
    version: String,
}

impl TreeWalker {
    pub fn new(root: impl Into<PathBuf>, version: impl Into<String>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(DocsError::ModulesDirNotFound { path: root });
        }

        Ok(Self {
            root,
            version: version.into(),
        })
    }

    pub fn documents(&self) -> impl Iterator<Item = Result<DocumentEntry>> + '_ {
        WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(MAX_DEPTH)
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) if entry.file_type().is_file() && is_markdown(entry.path()) => {
                    Some(Ok(self.to_entry(entry.into_path())))
                }
                Ok(_) => None,
                Err(e) => Some(Err(DocsError::from(e))),
            })
    }

    fn to_entry(&self, source: PathBuf) -> DocumentEntry {
        let relative = source
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| source.clone());

        let mut components = relative.components();
        let first = components.next();
        let module = match (first, components.next()) {
            (Some(Component::Normal(module)), Some(_)) => Some(ModuleKey {
                version: self.version.clone(),
                module: module.to_string_lossy().into_owned(),
            }),
            _ => None,
        };

        DocumentEntry {
            source,
            relative,
            module,
        }
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("md")
}
