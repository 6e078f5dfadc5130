//! Corpus health analysis and broken link detection.

use crate::graph::LinkGraph;
use crate::index::CorpusIndex;
use gardenlink_core::{IntegrityIssue, IntegrityReport, IssueKind};
use gardenlink_parser::tokens;
use serde::{Deserialize, Serialize};

/// A wiki-link whose target matches nothing in the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokenLink {
    /// Note containing the link
    pub source_slug: String,
    /// Raw target as written
    pub target: String,
    /// Byte offset of the token within the body
    pub offset: usize,
}

/// Every unresolved wiki-link in the corpus, in corpus and body order
pub fn broken_links(index: &CorpusIndex) -> Vec<BrokenLink> {
    index
        .notes()
        .iter()
        .flat_map(|note| {
            tokens(&note.body)
                .into_iter()
                .filter(|token| index.resolve_position(&token.raw_target).is_none())
                .map(|token| BrokenLink {
                    source_slug: note.slug.clone(),
                    target: token.raw_target,
                    offset: token.start_offset,
                })
        })
        .collect()
}

/// Health analysis report for a corpus
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub total_notes: usize,
    pub total_links: usize,
    pub broken_links: Vec<BrokenLink>,
    pub orphaned_notes: Vec<String>,
    /// Groups of notes that link to each other in a loop
    pub cycles: Vec<Vec<String>>,
    /// Index issues plus one issue per broken link and per cycle
    pub integrity: IntegrityReport,
}

impl HealthReport {
    /// True when no warning- or error-level issue was found
    pub fn is_healthy(&self) -> bool {
        self.integrity.is_clean()
    }
}

/// Analyzes a corpus index together with its derived graph
pub struct HealthAnalyzer<'a> {
    index: &'a CorpusIndex,
    graph: &'a LinkGraph,
}

impl<'a> HealthAnalyzer<'a> {
    pub fn new(index: &'a CorpusIndex, graph: &'a LinkGraph) -> Self {
        Self { index, graph }
    }

    /// Run the analysis, folding in issues already found while indexing.
    pub fn analyze(&self, index_report: IntegrityReport) -> HealthReport {
        let mut integrity = index_report;

        let broken = broken_links(self.index);
        for link in &broken {
            integrity.add_issue(IntegrityIssue::new(
                IssueKind::BrokenLink,
                &link.source_slug,
                &link.target,
                format!(
                    "Broken link in '{}': [[{}]] matches no note",
                    link.source_slug, link.target
                ),
            ));
        }

        let cycles = self.graph.cycles();
        for cycle in &cycles {
            let Some(first) = cycle.first() else {
                continue;
            };
            integrity.add_issue(IntegrityIssue::new(
                IssueKind::Cycle,
                first,
                cycle.join(" -> "),
                format!("Reference cycle through {}", cycle.join(", ")),
            ));
        }

        let report = HealthReport {
            total_notes: self.graph.len(),
            total_links: self.graph.total_links(),
            broken_links: broken,
            orphaned_notes: self
                .graph
                .orphans()
                .into_iter()
                .map(str::to_string)
                .collect(),
            cycles,
            integrity,
        };

        log::info!(
            "Health check: {} notes, {} broken links, {} cycles, {} orphans",
            report.total_notes,
            report.broken_links.len(),
            report.cycles.len(),
            report.orphaned_notes.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_graph;
    use gardenlink_core::{GrowthStage, Note};

    fn note(slug: &str, body: &str) -> Note {
        Note::new(slug, slug.to_uppercase(), GrowthStage::Seedling).with_body(body)
    }

    #[test]
    fn test_broken_links_with_offsets() {
        let (index, _) = CorpusIndex::build(vec![
            note("a", "ok [[b]] bad [[NoSuchNote]]"),
            note("b", "[[Gone|label]]"),
        ]);
        let broken = broken_links(&index);
        assert_eq!(
            broken,
            vec![
                BrokenLink {
                    source_slug: "a".to_string(),
                    target: "NoSuchNote".to_string(),
                    offset: 13,
                },
                BrokenLink {
                    source_slug: "b".to_string(),
                    target: "Gone".to_string(),
                    offset: 0,
                },
            ]
        );
    }

    #[test]
    fn test_resolved_corpus_is_healthy() {
        let (index, report) = CorpusIndex::build(vec![note("a", "[[b]]"), note("b", "")]);
        let graph = build_graph(&index);
        let health = HealthAnalyzer::new(&index, &graph).analyze(report);
        assert!(health.is_healthy());
        assert!(health.broken_links.is_empty());
        assert_eq!(health.total_links, 1);
    }

    #[test]
    fn test_analysis_collects_all_issue_kinds() {
        let (index, report) = CorpusIndex::build(vec![
            note("a", "[[b]] [[Missing]]").with_aliases(["shared"]),
            note("b", "[[a]]").with_aliases(["Shared"]),
            note("c", ""),
        ]);
        let graph = build_graph(&index);
        let health = HealthAnalyzer::new(&index, &graph).analyze(report);

        assert!(!health.is_healthy());
        assert_eq!(health.integrity.issues_of_kind(IssueKind::AliasCollision).len(), 1);
        assert_eq!(health.integrity.issues_of_kind(IssueKind::BrokenLink).len(), 1);
        assert_eq!(health.integrity.issues_of_kind(IssueKind::Cycle).len(), 1);
        assert_eq!(health.cycles, vec![vec!["a".to_string(), "b".to_string()]]);
        assert_eq!(health.orphaned_notes, vec!["c"]);
    }
}
