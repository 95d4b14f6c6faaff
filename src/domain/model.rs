use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A `<lang> reference` block body, parsed into its URL and line range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDeclaration {
    /// The body line exactly as written, url plus `#Lstart-Lend`.
    pub raw: String,
    pub url: String,
    pub start_line: usize,
    pub end_line: usize,
}

/// Version and module a document belongs to, extracted once while walking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleKey {
    pub version: String,
    pub module: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    pub source: PathBuf,
    /// Path relative to the module-tree root.
    pub relative: PathBuf,
    /// `None` for documents sitting directly in the root.
    pub module: Option<ModuleKey>,
}

#[derive(Debug, Clone)]
pub struct Document {
    pub entry: DocumentEntry,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub entry: DocumentEntry,
    pub content: String,
    pub resolved: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub documents: Vec<RenderedDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    pub version: String,
    pub modules: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildReport {
    pub output_path: String,
    pub documents_written: usize,
    /// Input documents that could not be read and were left out.
    pub documents_skipped: usize,
    pub references_resolved: usize,
    pub references_failed: usize,
    pub versions: Vec<VersionEntry>,
    pub summary_updated: bool,
}
