pub mod aggregator;
pub mod engine;
pub mod fetcher;
pub mod navigation;
pub mod pipeline;
pub mod reference;
pub mod rewriter;
#[cfg(test)]
pub(crate) mod test_support;
pub mod version;
pub mod walker;

pub use crate::domain::model::{BuildReport, Document, TransformResult};
pub use crate::domain::ports::{Pipeline, SourceFetcher, Storage};
pub use crate::utils::error::Result;
