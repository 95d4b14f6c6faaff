pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::HttpFetcher, storage::LocalStorage};
pub use config::BuildConfig;
pub use core::{engine::DocsEngine, pipeline::ReleasePipeline};
pub use utils::error::{DocsError, Result};
