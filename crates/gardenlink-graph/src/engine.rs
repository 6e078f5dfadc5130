//! Engine facade: one loaded corpus snapshot and every query over it.
//!
//! Queries before [`LinkEngine::load`] fail with [`Error::IndexNotBuilt`].
//! A slug that is not in the corpus fails with [`Error::NoteNotFound`]. Raw
//! targets that match nothing are not errors and resolve to `None`.

use crate::builder::{GraphBuilder, inbound, outbound};
use crate::graph::LinkGraph;
use crate::health::{BrokenLink, HealthAnalyzer, HealthReport, broken_links};
use crate::index::CorpusIndex;
use crate::traversal::{Traversal, detect_cycle_from, traverse_outbound};
use gardenlink_core::{
    Error, GardenConfig, IntegrityReport, Node, Note, ResolvedLink, Result, all_topics,
};
use gardenlink_parser::Rewriter;
use std::sync::Arc;

/// Wiki-link engine over a single corpus snapshot
#[derive(Debug, Clone, Default)]
pub struct LinkEngine {
    config: GardenConfig,
    index: Option<Arc<CorpusIndex>>,
    index_report: IntegrityReport,
}

impl LinkEngine {
    pub fn new(config: GardenConfig) -> Self {
        Self {
            config,
            index: None,
            index_report: IntegrityReport::new(),
        }
    }

    pub fn config(&self) -> &GardenConfig {
        &self.config
    }

    /// Index a corpus snapshot, replacing any previous one.
    ///
    /// Returns the non-fatal integrity issues found while indexing.
    pub fn load(&mut self, notes: Vec<Note>) -> &IntegrityReport {
        let (index, report) = CorpusIndex::build(notes);
        self.index = Some(Arc::new(index));
        self.index_report = report;
        &self.index_report
    }

    pub fn is_loaded(&self) -> bool {
        self.index.is_some()
    }

    /// Shared handle to the current index
    pub fn index(&self) -> Result<Arc<CorpusIndex>> {
        self.index.clone().ok_or(Error::IndexNotBuilt)
    }

    fn corpus(&self) -> Result<&CorpusIndex> {
        self.index.as_deref().ok_or(Error::IndexNotBuilt)
    }

    fn note(&self, slug: &str) -> Result<(&CorpusIndex, &Note)> {
        let index = self.corpus()?;
        let note = index.get(slug).ok_or_else(|| Error::not_found(slug))?;
        Ok((index, note))
    }

    /// Resolve a raw wiki-link target
    pub fn resolve(&self, raw_target: &str) -> Result<Option<ResolvedLink>> {
        Ok(self.corpus()?.resolve(raw_target))
    }

    /// Outbound links of a note
    pub fn outbound(&self, slug: &str) -> Result<Vec<ResolvedLink>> {
        let (index, note) = self.note(slug)?;
        Ok(outbound(index, note))
    }

    /// Notes linking to a note
    pub fn backlinks(&self, slug: &str) -> Result<Vec<ResolvedLink>> {
        let (index, note) = self.note(slug)?;
        Ok(inbound(index, note))
    }

    /// Derive the link graph for the whole corpus
    pub fn graph(&self) -> Result<LinkGraph> {
        let index = self.corpus()?;
        Ok(GraphBuilder::new(index)
            .parallel(self.config.parallel_graph)
            .build())
    }

    /// Multi-hop outbound traversal; `None` uses the configured default depth
    pub fn traverse(&self, slug: &str, max_depth: Option<usize>) -> Result<Traversal> {
        let depth = max_depth.unwrap_or(self.config.default_max_depth);
        traverse_outbound(self.corpus()?, slug, depth)
    }

    /// True if following links from `slug` ever loops back onto the path
    pub fn has_cycle_from(&self, slug: &str) -> Result<bool> {
        detect_cycle_from(self.corpus()?, slug)
    }

    /// Rewrite one text span into text and link nodes
    pub fn rewrite_span(&self, span: &str) -> Result<Vec<Node>> {
        let index = self.corpus()?;
        Ok(Rewriter::with_options(index, self.config.render_options()).rewrite_span(span))
    }

    /// Render a note body to HTML with wiki-links rewritten
    pub fn render(&self, slug: &str) -> Result<String> {
        let (index, note) = self.note(slug)?;
        Ok(Rewriter::with_options(index, self.config.render_options()).render_markdown(&note.body))
    }

    pub fn broken_links(&self) -> Result<Vec<BrokenLink>> {
        Ok(broken_links(self.corpus()?))
    }

    /// Full health check: index issues, broken links, cycles and orphans
    pub fn check(&self) -> Result<HealthReport> {
        let index = self.corpus()?;
        let graph = self.graph()?;
        Ok(HealthAnalyzer::new(index, &graph).analyze(self.index_report.clone()))
    }

    /// Distinct topics across the corpus
    pub fn topics(&self) -> Result<Vec<String>> {
        Ok(all_topics(self.corpus()?.notes()))
    }
}
