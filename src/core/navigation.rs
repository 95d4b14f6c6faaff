use crate::domain::model::VersionEntry;
use crate::utils::error::{DocsError, Result};
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::LazyLock;

pub const MODULES_MARKER: &str = "<!-- modules -->";
pub const MODULES_PLACEHOLDER: &str = "{{ modules }}";
pub const DEFAULT_TEMPLATE: &str = "# Modules\n\n{{ modules }}\n";

const GITBOOK_META: &str = "---
layout:
  title:
    visible: true
  description:
    visible: false
  tableOfContents:
    visible: true
  outline:
    visible: false
  pagination:
    visible: true
---

";

static MARKER_REGION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)([ \t]*)<!-- modules -->[ \t]*(\r?\n)(.*?)([ \t]*)<!-- modules -->")
        .expect("marker region pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationOptions {
    /// Path of the docs output root as seen from the summary file.
    pub link_prefix: String,
    /// Prepended to module names in link text, e.g. `x/bank`.
    pub module_label_prefix: String,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            link_prefix: "modules".to_string(),
            module_label_prefix: "x/".to_string(),
        }
    }
}

fn link(prefix: &str, segments: &[&str]) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(segments.len() + 1);
    let prefix = prefix.trim_end_matches('/');
    if !prefix.is_empty() {
        parts.push(prefix);
    }
    parts.extend_from_slice(segments);
    parts.join("/")
}

/// Summary lines: one per version, its modules indented one level below.
pub fn render_summary_fragment(
    versions: &[VersionEntry],
    options: &NavigationOptions,
) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in versions {
        lines.push(format!(
            "* [{}]({})",
            entry.version,
            link(&options.link_prefix, &[&entry.version, "README.md"])
        ));
        for module in &entry.modules {
            lines.push(format!(
                "  * [{}{}]({})",
                options.module_label_prefix,
                module,
                link(&options.link_prefix, &[&entry.version, module, "README.md"])
            ));
        }
    }
    lines
}

/// Replaces the interior of every `<!-- modules -->` pair with `lines`,
/// indented like the opening tag and ended like its line. Returns `None` when
/// no marker pair exists.
pub fn update_summary(text: &str, lines: &[String]) -> Option<String> {
    if !MARKER_REGION.is_match(text) {
        return None;
    }

    let updated = MARKER_REGION.replace_all(text, |caps: &Captures| {
        let indent = &caps[1];
        let eol = &caps[2];
        let end_indent = &caps[4];
        if lines.is_empty() {
            return format!("{indent}{MODULES_MARKER}{eol}{end_indent}{MODULES_MARKER}");
        }

        let body = lines
            .iter()
            .map(|line| {
                if line.trim().is_empty() {
                    indent.to_string()
                } else {
                    format!("{indent}{line}")
                }
            })
            .collect::<Vec<_>>()
            .join(eol);
        format!("{indent}{MODULES_MARKER}{eol}{body}{eol}{end_indent}{MODULES_MARKER}")
    });

    Some(updated.into_owned())
}

/// Rewrites the summary file in place. Bytes outside the marker region are
/// preserved; a file without markers is left untouched.
pub fn update_summary_file(path: &Path, lines: &[String]) -> Result<()> {
    let content = std::fs::read_to_string(path).map_err(|e| DocsError::io(path, e))?;
    let updated = update_summary(&content, lines).ok_or_else(|| DocsError::MissingMarkers {
        path: path.to_path_buf(),
    })?;

    if updated != content {
        std::fs::write(path, updated).map_err(|e| DocsError::io(path, e))?;
    }
    Ok(())
}

/// Root listing: the template with `{{ modules }}` replaced by one line per version.
pub fn render_root_index(template: &str, versions: &[VersionEntry]) -> String {
    let listing = versions
        .iter()
        .map(|entry| format!("* [{}]({}/README.md)", entry.version, entry.version))
        .collect::<Vec<_>>()
        .join("\n");
    template.replace(MODULES_PLACEHOLDER, &listing)
}

/// Per-version listing written next to the module directories.
pub fn render_module_index(modules: &[String]) -> String {
    let mut index = String::from("# Modules\n\n");
    for module in modules {
        index.push_str(&format!("* [{}]({}/README.md)\n", module, module));
    }
    index
}

pub fn with_gitbook_meta(content: &str) -> String {
    format!("{}{}", GITBOOK_META, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(version: &str, modules: &[&str]) -> VersionEntry {
        VersionEntry {
            version: version.to_string(),
            modules: modules.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn test_update_summary_preserves_outside_bytes() {
        let summary = "A\n<!-- modules -->\nOLD\n<!-- modules -->\nB";
        let lines = vec!["* [v1](modules/v1/README.md)".to_string()];

        let updated = update_summary(summary, &lines).unwrap();

        assert_eq!(
            updated,
            "A\n<!-- modules -->\n* [v1](modules/v1/README.md)\n<!-- modules -->\nB"
        );
        assert!(updated.starts_with("A\n"));
        assert!(updated.ends_with("\nB"));
        assert!(!updated.contains("OLD"));
    }

    #[test]
    fn test_update_summary_keeps_indentation() {
        let summary = "# Summary\n\n* [Modules](modules/README.md)\n  <!-- modules -->\n  <!-- modules -->\n* [Other](other.md)\n";
        let lines = vec![
            "* [main](modules/main/README.md)".to_string(),
            "  * [x/bank](modules/main/bank/README.md)".to_string(),
        ];

        let updated = update_summary(summary, &lines).unwrap();

        assert_eq!(
            updated,
            "# Summary\n\n* [Modules](modules/README.md)\n  <!-- modules -->\n  * [main](modules/main/README.md)\n    * [x/bank](modules/main/bank/README.md)\n  <!-- modules -->\n* [Other](other.md)\n"
        );
    }

    #[test]
    fn test_update_summary_is_idempotent() {
        let summary = "Intro\n\n<!-- modules -->\n* stale\n* entries\n<!-- modules -->\n\nOutro\n";
        let lines = vec!["* [main](modules/main/README.md)".to_string()];

        let once = update_summary(summary, &lines).unwrap();
        let twice = update_summary(&once, &lines).unwrap();

        assert_eq!(once, twice);
        assert!(once.starts_with("Intro\n\n"));
        assert!(once.ends_with("\n\nOutro\n"));
    }

    #[test]
    fn test_update_summary_keeps_crlf_line_endings() {
        let summary = "A\r\n  <!-- modules -->\r\n  OLD\r\n  <!-- modules -->\r\nB\r\n";
        let lines = vec![
            "* [main](modules/main/README.md)".to_string(),
            "  * [x/bank](modules/main/bank/README.md)".to_string(),
        ];

        let updated = update_summary(summary, &lines).unwrap();

        assert_eq!(
            updated,
            "A\r\n  <!-- modules -->\r\n  * [main](modules/main/README.md)\r\n    * [x/bank](modules/main/bank/README.md)\r\n  <!-- modules -->\r\nB\r\n"
        );
        assert_eq!(update_summary(&updated, &lines).unwrap(), updated);
    }

    #[test]
    fn test_update_summary_empty_fragment() {
        let summary = "<!-- modules -->\nOLD\n<!-- modules -->";
        assert_eq!(
            update_summary(summary, &[]).unwrap(),
            "<!-- modules -->\n<!-- modules -->"
        );
    }

    #[test]
    fn test_update_summary_without_markers() {
        assert!(update_summary("# Summary\n\n* [Intro](README.md)\n", &[]).is_none());
        assert!(update_summary("<!-- modules -->\nonly one tag\n", &[]).is_none());
    }

    #[test]
    fn test_update_summary_file_missing_markers_leaves_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("SUMMARY.md");
        std::fs::write(&path, "# Summary\n").unwrap();

        let err = update_summary_file(&path, &["* x".to_string()]).unwrap_err();

        assert!(matches!(err, DocsError::MissingMarkers { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Summary\n");
    }

    #[test]
    fn test_render_summary_fragment() {
        let versions = vec![entry("main", &["bank", "staking"]), entry("v1.0.0", &[])];

        let lines = render_summary_fragment(&versions, &NavigationOptions::default());

        assert_eq!(
            lines,
            vec![
                "* [main](modules/main/README.md)",
                "  * [x/bank](modules/main/bank/README.md)",
                "  * [x/staking](modules/main/staking/README.md)",
                "* [v1.0.0](modules/v1.0.0/README.md)",
            ]
        );
    }

    #[test]
    fn test_render_summary_fragment_without_prefix() {
        let options = NavigationOptions {
            link_prefix: String::new(),
            module_label_prefix: String::new(),
        };
        let lines = render_summary_fragment(&[entry("main", &["bank"])], &options);
        assert_eq!(lines, vec!["* [main](main/README.md)", "  * [bank](main/bank/README.md)"]);
    }

    #[test]
    fn test_render_root_index() {
        let versions = vec![entry("main", &["bank"]), entry("v2.0.0", &["bank"])];

        let index = render_root_index("# Docs\n\n{{ modules }}\n\nFooter\n", &versions);

        assert_eq!(
            index,
            "# Docs\n\n* [main](main/README.md)\n* [v2.0.0](v2.0.0/README.md)\n\nFooter\n"
        );
    }

    #[test]
    fn test_render_module_index() {
        let modules = vec!["avs".to_string(), "bank".to_string()];
        assert_eq!(
            render_module_index(&modules),
            "# Modules\n\n* [avs](avs/README.md)\n* [bank](bank/README.md)\n"
        );
    }

    #[test]
    fn test_with_gitbook_meta() {
        let content = with_gitbook_meta("# Bank\n");
        assert!(content.starts_with("---\nlayout:\n"));
        assert!(content.ends_with("---\n\n# Bank\n"));
    }
}
