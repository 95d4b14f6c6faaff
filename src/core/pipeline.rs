use crate::config::BuildConfig;
use crate::core::aggregator::{aggregate, list_modules};
use crate::core::fetcher::SliceFetcher;
use crate::core::navigation::{
    render_module_index, render_root_index, render_summary_fragment, update_summary_file,
    with_gitbook_meta, DEFAULT_TEMPLATE, MODULES_PLACEHOLDER,
};
use crate::core::rewriter::DocumentRewriter;
use crate::core::walker::TreeWalker;
use crate::domain::model::{BuildReport, Document, RenderedDocument, TransformResult};
use crate::domain::ports::{Pipeline, SourceFetcher, Storage};
use crate::utils::error::{DocsError, Result};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

const README: &str = "README.md";

/// Builds one release: the module tree goes to `<docs_dir>/<release_version>`,
/// then the indexes and the summary are regenerated over every version.
pub struct ReleasePipeline<S: Storage, F: SourceFetcher> {
    storage: S,
    fetcher: SliceFetcher<F>,
    config: BuildConfig,
    skipped: AtomicUsize,
}

impl<S: Storage, F: SourceFetcher> ReleasePipeline<S, F> {
    /// `storage` must be rooted at `config.docs_dir`.
    pub fn new(storage: S, source: F, config: BuildConfig) -> Self {
        let fetcher = SliceFetcher::new(source, config.raw_content_base.clone());
        Self {
            storage,
            fetcher,
            config,
            skipped: AtomicUsize::new(0),
        }
    }

    fn decorate(&self, content: &str) -> String {
        if self.config.gitbook_meta {
            with_gitbook_meta(content)
        } else {
            content.to_string()
        }
    }

    fn load_template(&self) -> Result<String> {
        let template = match &self.config.template_file {
            Some(path) => std::fs::read_to_string(path).map_err(|e| DocsError::io(path, e))?,
            None => DEFAULT_TEMPLATE.to_string(),
        };
        if !template.contains(MODULES_PLACEHOLDER) {
            tracing::warn!(
                "⚠️ Template has no {} placeholder, the root README will not list versions",
                MODULES_PLACEHOLDER
            );
        }
        Ok(template)
    }

    /// Leaves files whose bytes did not change alone, so reruns keep mtimes.
    async fn write_if_changed(&self, key: &str, content: &str) -> Result<()> {
        if let Ok(existing) = self.storage.read_file(key).await {
            if existing == content.as_bytes() {
                tracing::debug!("Unchanged {}", key);
                return Ok(());
            }
        }
        self.storage.write_file(key, content.as_bytes()).await
    }

    fn update_summary(&self, lines: &[String]) -> bool {
        let summary = &self.config.summary_file;
        if !summary.is_file() {
            tracing::warn!("⚠️ Summary file {} not found, skipping", summary.display());
            return false;
        }

        match update_summary_file(summary, lines) {
            Ok(()) => {
                tracing::info!("📝 Updated summary {}", summary.display());
                true
            }
            Err(e) => {
                tracing::warn!("⚠️ {}", e);
                tracing::warn!("💡 {}", e.recovery_suggestion());
                false
            }
        }
    }
}

/// Storage key with `/` separators whatever the host platform.
fn storage_key(version: &str, relative: &Path) -> String {
    let mut key = version.to_string();
    for component in relative.components() {
        key.push('/');
        key.push_str(&component.as_os_str().to_string_lossy());
    }
    key
}

#[async_trait::async_trait]
impl<S: Storage, F: SourceFetcher> Pipeline for ReleasePipeline<S, F> {
    async fn extract(&self) -> Result<Vec<Document>> {
        tracing::info!("Modules directory: {}", self.config.modules_dir.display());
        tracing::info!("Docs directory: {}", self.config.docs_dir.display());

        let walker = TreeWalker::new(&self.config.modules_dir, &self.config.release_version)?;
        let mut entries = walker.documents().collect::<Result<Vec<_>>>()?;
        entries.sort_by(|a, b| a.relative.cmp(&b.relative));

        let mut documents = Vec::with_capacity(entries.len());
        let mut skipped = 0;
        for entry in entries {
            match std::fs::read_to_string(&entry.source) {
                Ok(content) => documents.push(Document { entry, content }),
                Err(e) => {
                    tracing::warn!("⚠️ Skipping {}: {}", entry.source.display(), e);
                    skipped += 1;
                }
            }
        }
        self.skipped.store(skipped, Ordering::Relaxed);
        Ok(documents)
    }

    async fn transform(&self, documents: Vec<Document>) -> Result<TransformResult> {
        let rewriter = DocumentRewriter::new(&self.fetcher, self.config.concurrent_requests);
        let mut rendered = Vec::with_capacity(documents.len());

        for document in documents {
            match &document.entry.module {
                Some(key) => tracing::info!(
                    "Processing {} ({}/{})",
                    document.entry.source.display(),
                    key.version,
                    key.module
                ),
                None => tracing::info!("Processing {}", document.entry.source.display()),
            }
            let outcome = rewriter.rewrite(&document).await;
            rendered.push(RenderedDocument {
                content: self.decorate(&outcome.content),
                entry: document.entry,
                resolved: outcome.resolved,
                failed: outcome.failed,
            });
        }

        Ok(TransformResult {
            documents: rendered,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<BuildReport> {
        let version = &self.config.release_version;
        let mut documents_written = 0;
        let mut references_resolved = 0;
        let mut references_failed = 0;

        for document in &result.documents {
            references_resolved += document.resolved;
            references_failed += document.failed;

            // 版本根目錄的 README 由模組清單重新產生
            if document.entry.relative == Path::new(README) {
                tracing::debug!("Skipping {}, replaced by the generated index", README);
                continue;
            }

            let key = storage_key(version, &document.entry.relative);
            self.write_if_changed(&key, &document.content).await?;
            documents_written += 1;
            tracing::debug!("Saved to {}", key);
        }

        let modules = list_modules(&self.storage, version).await?;
        let module_index = self.decorate(&render_module_index(&modules));
        self.write_if_changed(&format!("{}/{}", version, README), &module_index)
            .await?;

        let versions = aggregate(&self.storage, self.config.version_order).await?;
        let root_index = render_root_index(&self.load_template()?, &versions);
        self.write_if_changed(README, &root_index).await?;

        let lines = render_summary_fragment(&versions, &self.config.navigation);
        let summary_updated = self.update_summary(&lines);

        Ok(BuildReport {
            output_path: self.config.release_dir().display().to_string(),
            documents_written,
            documents_skipped: self.skipped.load(Ordering::Relaxed),
            references_resolved,
            references_failed,
            versions,
            summary_updated,
        })
    }
}
