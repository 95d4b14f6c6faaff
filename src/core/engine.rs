use crate::domain::model::BuildReport;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct DocsEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> DocsEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<BuildReport> {
        tracing::info!("Starting documentation build...");

        let documents = self.pipeline.extract().await?;
        tracing::info!("Found {} markdown documents", documents.len());

        let result = self.pipeline.transform(documents).await?;
        let failed: usize = result.documents.iter().map(|d| d.failed).sum();
        if failed > 0 {
            tracing::warn!("⚠️ {} references could not be resolved and were left as is", failed);
        }

        let report = self.pipeline.load(result).await?;
        if report.documents_skipped > 0 {
            tracing::warn!(
                "⚠️ {} documents could not be read and were skipped",
                report.documents_skipped
            );
        }
        tracing::info!(
            "Wrote {} documents, resolved {} references across {} versions",
            report.documents_written,
            report.references_resolved,
            report.versions.len()
        );

        Ok(report)
    }
}
