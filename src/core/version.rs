use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Label of the unversioned documentation tree.
pub const UNVERSIONED: &str = "main";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum VersionOrder {
    Ascending,
    #[default]
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionLabel {
    Unversioned,
    Semantic {
        numbers: [u64; 3],
        pre: Option<String>,
    },
    Other(String),
}

impl VersionLabel {
    /// Lenient parse: `v` prefix optional, missing components count as zero.
    pub fn parse(label: &str) -> Self {
        if label == UNVERSIONED {
            return Self::Unversioned;
        }

        let trimmed = label.strip_prefix('v').unwrap_or(label);
        let (core, pre) = match trimmed.split_once('-') {
            Some((core, pre)) => (core, Some(pre.to_string())),
            None => (trimmed, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.is_empty() || parts.len() > 3 {
            return Self::Other(label.to_string());
        }

        let mut numbers = [0u64; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            match part.parse() {
                Ok(n) => *slot = n,
                Err(_) => return Self::Other(label.to_string()),
            }
        }

        Self::Semantic { numbers, pre }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Unversioned => 0,
            Self::Semantic { .. } => 1,
            Self::Other(_) => 2,
        }
    }
}

fn compare_semantic(
    (a, a_pre): (&[u64; 3], &Option<String>),
    (b, b_pre): (&[u64; 3], &Option<String>),
) -> Ordering {
    a.cmp(b).then_with(|| match (a_pre, b_pre) {
        (None, None) => Ordering::Equal,
        // 預發佈版本排在正式版本之前
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (Some(x), Some(y)) => x.cmp(y),
    })
}

/// Compares two labels for display: `main` first, then semantic versions in
/// `order`, then anything unparseable alphabetically.
pub fn compare_labels(a: &str, b: &str, order: VersionOrder) -> Ordering {
    let (la, lb) = (VersionLabel::parse(a), VersionLabel::parse(b));
    match (&la, &lb) {
        (
            VersionLabel::Semantic { numbers: na, pre: pa },
            VersionLabel::Semantic { numbers: nb, pre: pb },
        ) => {
            let ord = compare_semantic((na, pa), (nb, pb));
            let ord = match order {
                VersionOrder::Ascending => ord,
                VersionOrder::Descending => ord.reverse(),
            };
            ord.then_with(|| a.cmp(b))
        }
        _ => la.rank().cmp(&lb.rank()).then_with(|| a.cmp(b)),
    }
}

pub fn sort_versions(labels: &mut [String], order: VersionOrder) {
    labels.sort_by(|a, b| compare_labels(a, b, order));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(labels: &[&str], order: VersionOrder) -> Vec<String> {
        let mut labels: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
        sort_versions(&mut labels, order);
        labels
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!(VersionLabel::parse("main"), VersionLabel::Unversioned);
        assert_eq!(
            VersionLabel::parse("v1.2.3"),
            VersionLabel::Semantic {
                numbers: [1, 2, 3],
                pre: None
            }
        );
        assert_eq!(
            VersionLabel::parse("2.0"),
            VersionLabel::Semantic {
                numbers: [2, 0, 0],
                pre: None
            }
        );
        assert_eq!(
            VersionLabel::parse("v3.0.0-rc1"),
            VersionLabel::Semantic {
                numbers: [3, 0, 0],
                pre: Some("rc1".to_string())
            }
        );
        assert_eq!(
            VersionLabel::parse("nightly"),
            VersionLabel::Other("nightly".to_string())
        );
        assert_eq!(
            VersionLabel::parse("1.2.3.4"),
            VersionLabel::Other("1.2.3.4".to_string())
        );
    }

    #[test]
    fn test_main_always_first() {
        assert_eq!(
            sorted(&["v1.0.0", "main", "v2.0.0"], VersionOrder::Descending),
            vec!["main", "v2.0.0", "v1.0.0"]
        );
        assert_eq!(
            sorted(&["v1.0.0", "main", "v2.0.0"], VersionOrder::Ascending),
            vec!["main", "v1.0.0", "v2.0.0"]
        );
    }

    #[test]
    fn test_semantic_not_lexical() {
        assert_eq!(
            sorted(&["v1.10.0", "v1.9.0", "v1.2.0"], VersionOrder::Descending),
            vec!["v1.10.0", "v1.9.0", "v1.2.0"]
        );
    }

    #[test]
    fn test_pre_release_below_release() {
        assert_eq!(
            sorted(&["v2.0.0", "v2.0.0-rc1", "v1.9.0"], VersionOrder::Ascending),
            vec!["v1.9.0", "v2.0.0-rc1", "v2.0.0"]
        );
    }

    #[test]
    fn test_unparseable_labels_last() {
        assert_eq!(
            sorted(&["nightly", "v1.0.0", "main", "beta"], VersionOrder::Descending),
            vec!["main", "v1.0.0", "beta", "nightly"]
        );
    }
}
