use crate::domain::ports::SourceFetcher;
use crate::utils::error::Result;

pub const DEFAULT_RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";

/// Rewrites a `github.com/<owner>/<repo>/blob/<ref>/<path>` URL to its
/// raw-content form under `raw_base`. Pure string transform.
pub fn to_raw_url(url: &str, raw_base: &str) -> String {
    let path = url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");
    let path = path.strip_prefix("github.com").unwrap_or(path);
    let path = path.replacen("/blob/", "/", 1);

    format!("{}/{}", raw_base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Inclusive, 1-indexed line range of `text`. Lines past the end of the text
/// are simply missing from the result.
pub fn slice_lines(text: &str, start: usize, end: usize) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let from = start.saturating_sub(1).min(lines.len());
    let to = end.min(lines.len()).max(from);
    lines[from..to].join("\n")
}

pub struct SliceFetcher<F: SourceFetcher> {
    source: F,
    raw_base: String,
}

impl<F: SourceFetcher> SliceFetcher<F> {
    pub fn new(source: F, raw_base: impl Into<String>) -> Self {
        Self {
            source,
            raw_base: raw_base.into(),
        }
    }

    pub async fn fetch_slice(&self, url: &str, start: usize, end: usize) -> Result<String> {
        let raw_url = to_raw_url(url, &self.raw_base);
        tracing::debug!("Fetching {} (lines {}-{})", raw_url, start, end);

        let text = self.source.fetch_text(&raw_url).await?;
        let available = text.split('\n').count();
        if available < end {
            tracing::warn!(
                "⚠️ {} has {} lines, requested up to line {}; using the lines available",
                raw_url,
                available,
                end
            );
        }

        Ok(slice_lines(&text, start, end))
    }
}
