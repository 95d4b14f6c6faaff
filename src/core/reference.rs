use crate::domain::model::ReferenceDeclaration;
use crate::utils::error::{DocsError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static REFERENCE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```\w+ reference\n((?:https://)?github\.com/.*?)\n```")
        .expect("reference block pattern is valid")
});

/// Body lines of every `<lang> reference` block, deduplicated textually,
/// in order of first appearance.
pub fn locate_references(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    REFERENCE_BLOCK
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .filter(|raw| seen.insert(raw.clone()))
        .collect()
}

impl ReferenceDeclaration {
    pub fn parse(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.split("#L").collect();
        if parts.len() != 2 {
            return Err(DocsError::malformed(
                raw,
                "expected exactly one #L line fragment",
            ));
        }
        let (url, lines) = (parts[0], parts[1]);

        let lines = lines.replace('L', "");
        let bounds: Vec<&str> = lines.split('-').collect();
        if bounds.len() != 2 {
            return Err(DocsError::malformed(
                raw,
                format!("invalid line format: {}", lines),
            ));
        }

        let start: i64 = bounds[0].trim().parse().map_err(|_| {
            DocsError::malformed(raw, format!("start line '{}' is not a number", bounds[0]))
        })?;
        let end: i64 = bounds[1].trim().parse().map_err(|_| {
            DocsError::malformed(raw, format!("end line '{}' is not a number", bounds[1]))
        })?;

        if start <= 0 || end <= 0 || start >= end {
            return Err(DocsError::InvalidLineRange {
                reference: raw.to_string(),
                start,
                end,
            });
        }

        Ok(Self {
            raw: raw.to_string(),
            url: url.to_string(),
            start_line: start as usize,
            end_line: end as usize,
        })
    }
}
