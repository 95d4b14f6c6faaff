use crate::core::fetcher::SliceFetcher;
use crate::core::reference::locate_references;
use crate::domain::model::{Document, ReferenceDeclaration};
use crate::domain::ports::SourceFetcher;
use crate::utils::error::Result;
use futures::stream::{self, StreamExt};

const FENCE: &str = "```";

#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    pub content: String,
    pub resolved: usize,
    pub failed: usize,
}

/// Replaces `" reference\n<raw>\n```"` with `"\n<slice>\n```"` for every
/// pair. The fence and its language tag stay; identical declarations in
/// different blocks are all rewritten by the same pass. The closing fence is
/// part of the match so a body that is a prefix of another body (`#L1-L2`
/// and `#L1-L20`) only rewrites its own blocks.
pub fn apply_replacements(content: &str, resolved: &[(ReferenceDeclaration, String)]) -> String {
    let mut content = content.to_string();
    for (decl, slice) in resolved {
        content = content.replace(
            &format!(" reference\n{}\n{}", decl.raw, FENCE),
            &format!("\n{}\n{}", slice, FENCE),
        );
    }
    content
}

pub struct DocumentRewriter<'a, F: SourceFetcher> {
    fetcher: &'a SliceFetcher<F>,
    concurrency: usize,
}

impl<'a, F: SourceFetcher> DocumentRewriter<'a, F> {
    pub fn new(fetcher: &'a SliceFetcher<F>, concurrency: usize) -> Self {
        Self {
            fetcher,
            concurrency: concurrency.max(1),
        }
    }

    async fn resolve(&self, decl: ReferenceDeclaration) -> (ReferenceDeclaration, Result<String>) {
        let slice = self
            .fetcher
            .fetch_slice(&decl.url, decl.start_line, decl.end_line)
            .await;
        (decl, slice)
    }

    pub async fn rewrite(&self, document: &Document) -> RewriteOutcome {
        let file = document.entry.source.display();
        let mut failed = 0;

        let mut declarations = Vec::new();
        for raw in locate_references(&document.content) {
            match ReferenceDeclaration::parse(&raw) {
                Ok(decl) => declarations.push(decl),
                Err(e) => {
                    tracing::warn!("⚠️ {} in file {}", e, file);
                    failed += 1;
                }
            }
        }

        if declarations.is_empty() {
            return RewriteOutcome {
                content: document.content.clone(),
                resolved: 0,
                failed,
            };
        }

        // 依宣告順序收集結果後才一次改寫
        let pending: Vec<_> = declarations
            .into_iter()
            .map(|decl| self.resolve(decl))
            .collect();
        let fetched: Vec<_> = stream::iter(pending)
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut resolved = Vec::with_capacity(fetched.len());
        for (decl, slice) in fetched {
            match slice {
                Ok(slice) => resolved.push((decl, slice)),
                Err(e) => {
                    tracing::warn!(
                        "⚠️ Could not resolve {} in file {}: {}",
                        decl.raw,
                        file,
                        e
                    );
                    failed += 1;
                }
            }
        }

        RewriteOutcome {
            content: apply_replacements(&document.content, &resolved),
            resolved: resolved.len(),
            failed,
        }
    }
}
