//! Corpus integrity reporting.
//!
//! Index construction never rejects a corpus. Key collisions, broken links and
//! reference cycles are collected here as non-fatal issues instead.

use serde::{Deserialize, Serialize};

/// Severity level for integrity issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message (not a problem)
    Info,
    /// Warning (should be addressed but not critical)
    Warning,
    /// Error (content is inconsistent)
    Error,
}

/// What kind of integrity problem was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Two notes share a slug; the later one is unreachable
    DuplicateSlug,
    /// Two notes normalize to the same title key
    TitleCollision,
    /// An alias is claimed by more than one note
    AliasCollision,
    /// A wiki-link target matches nothing in the corpus
    BrokenLink,
    /// Following outbound links returns to a note already on the path
    Cycle,
}

impl IssueKind {
    /// Default severity for this kind of issue
    pub fn severity(self) -> Severity {
        match self {
            Self::DuplicateSlug => Severity::Error,
            Self::TitleCollision | Self::AliasCollision | Self::BrokenLink => Severity::Warning,
            Self::Cycle => Severity::Info,
        }
    }
}

/// A single integrity issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityIssue {
    pub severity: Severity,
    pub kind: IssueKind,
    /// Note the issue was found in or attributed to
    pub slug: String,
    /// Normalized key or raw target involved
    pub key: String,
    pub message: String,
}

impl IntegrityIssue {
    /// Create a new issue with the kind's default severity
    pub fn new(
        kind: IssueKind,
        slug: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            slug: slug.into(),
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Summary counts by severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegritySummary {
    pub info_count: usize,
    pub warning_count: usize,
    pub error_count: usize,
}

/// Collected integrity issues for a corpus snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub issues: Vec<IntegrityIssue>,
    pub summary: IntegritySummary,
}

impl IntegrityReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue and log it
    pub fn add_issue(&mut self, issue: IntegrityIssue) {
        match issue.severity {
            Severity::Info => {
                self.summary.info_count += 1;
                log::debug!("{}", issue.message);
            }
            Severity::Warning => {
                self.summary.warning_count += 1;
                log::warn!("{}", issue.message);
            }
            Severity::Error => {
                self.summary.error_count += 1;
                log::warn!("{}", issue.message);
            }
        }
        self.issues.push(issue);
    }

    pub fn issues_of_kind(&self, kind: IssueKind) -> Vec<&IntegrityIssue> {
        self.issues.iter().filter(|i| i.kind == kind).collect()
    }

    /// True when nothing at warning level or above was recorded
    pub fn is_clean(&self) -> bool {
        self.summary.warning_count == 0 && self.summary.error_count == 0
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts_by_severity() {
        let mut report = IntegrityReport::new();
        report.add_issue(IntegrityIssue::new(
            IssueKind::AliasCollision,
            "b",
            "foo",
            "alias 'foo' already registered",
        ));
        report.add_issue(IntegrityIssue::new(IssueKind::Cycle, "a", "a", "cycle"));

        assert_eq!(report.summary.warning_count, 1);
        assert_eq!(report.summary.info_count, 1);
        assert!(!report.is_clean());
        assert_eq!(report.issues_of_kind(IssueKind::Cycle).len(), 1);
    }

    #[test]
    fn test_info_only_report_is_clean() {
        let mut report = IntegrityReport::new();
        report.add_issue(IntegrityIssue::new(IssueKind::Cycle, "a", "a", "cycle"));
        assert!(report.is_clean());
        assert!(!report.is_empty());
    }
}
