use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocsError {
    #[error("Modules directory does not exist: {path:?}")]
    ModulesDirNotFound { path: PathBuf },

    #[error("IO error at {path:?}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("HTTP {status} while fetching {url}")]
    HttpStatusError { url: String, status: u16 },

    #[error("Invalid link: {reference} ({reason})")]
    MalformedReference { reference: String, reason: String },

    #[error("Invalid line range: {start}-{end} in {reference}")]
    InvalidLineRange {
        reference: String,
        start: i64,
        end: i64,
    },

    #[error("Marker tags not found in {path:?}")]
    MissingMarkers { path: PathBuf },

    #[error("Directory walk failed: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// 單一項目失敗，流程繼續
    Recoverable,
    /// 中止整個執行
    Fatal,
}

impl DocsError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(reference: &str, reason: impl Into<String>) -> Self {
        Self::MalformedReference {
            reference: reference.to_string(),
            reason: reason.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DocsError::HttpError(_)
            | DocsError::HttpStatusError { .. }
            | DocsError::MalformedReference { .. }
            | DocsError::InvalidLineRange { .. }
            | DocsError::MissingMarkers { .. } => ErrorSeverity::Recoverable,
            DocsError::ModulesDirNotFound { .. }
            | DocsError::IoError { .. }
            | DocsError::WalkError(_)
            | DocsError::SerializationError(_)
            | DocsError::ConfigError { .. }
            | DocsError::InvalidConfigValueError { .. } => ErrorSeverity::Fatal,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DocsError::ModulesDirNotFound { .. } => {
                "Check the modules directory argument points at an existing directory"
            }
            DocsError::IoError { .. } | DocsError::WalkError(_) => {
                "Check file permissions and available disk space"
            }
            DocsError::HttpError(_) | DocsError::HttpStatusError { .. } => {
                "Check network access and that the referenced file still exists upstream"
            }
            DocsError::MalformedReference { .. } | DocsError::InvalidLineRange { .. } => {
                "Use the form github.com/<owner>/<repo>/blob/<ref>/<path>#L<start>-L<end> with start < end"
            }
            DocsError::MissingMarkers { .. } => {
                "Add a pair of <!-- modules --> tags to the summary file"
            }
            DocsError::SerializationError(_) => "Report this as a bug",
            DocsError::ConfigError { .. } | DocsError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DocsError>;
