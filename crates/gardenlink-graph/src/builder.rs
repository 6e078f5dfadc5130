//! Per-note outbound and inbound link derivation.
//!
//! Every function here is a pure function of the read-only [`CorpusIndex`].
//! Bodies are scanned with the wiki-link scanner, tokens are resolved through
//! the index, and results are deduplicated by slug in first-occurrence order.
//! A note's `outbound_links_override` replaces its own outbound set only;
//! inbound derivation always scans raw bodies.

use crate::graph::{LinkGraph, NoteLinks};
use crate::index::CorpusIndex;
use gardenlink_core::{Note, ResolvedLink, normalize};
use gardenlink_parser::tokens;
use rayon::prelude::*;
use std::collections::HashSet;

/// Positions of the notes a body links to, deduplicated, self excluded.
pub(crate) fn body_targets(index: &CorpusIndex, note: &Note) -> Vec<usize> {
    let own = index.position(&note.slug);
    let mut seen = HashSet::new();

    tokens(&note.body)
        .iter()
        .filter_map(|token| index.resolve_position(&token.raw_target))
        .filter(|&target| Some(target) != own)
        .filter(|&target| seen.insert(target))
        .collect()
}

/// Outbound links of a note.
///
/// Uses the note's override list when present (minus any entry pointing back
/// at the note itself), otherwise the resolved links of its body.
pub fn outbound(index: &CorpusIndex, note: &Note) -> Vec<ResolvedLink> {
    if let Some(links) = &note.outbound_links_override {
        let own = normalize(&note.slug);
        return links
            .iter()
            .filter(|link| normalize(&link.slug) != own)
            .cloned()
            .collect();
    }

    body_targets(index, note)
        .into_iter()
        .map(|target| index.note_at(target).to_resolved_link())
        .collect()
}

/// Notes whose body links to `note`, in corpus order, each listed once.
pub fn inbound(index: &CorpusIndex, note: &Note) -> Vec<ResolvedLink> {
    let own = normalize(&note.slug);

    index
        .notes()
        .iter()
        .filter(|other| normalize(&other.slug) != own)
        .filter(|other| {
            tokens(&other.body).iter().any(|token| {
                index
                    .resolve_note(&token.raw_target)
                    .is_some_and(|target| normalize(&target.slug) == own)
            })
        })
        .map(Note::to_resolved_link)
        .collect()
}

/// Derives the full [`LinkGraph`] for a corpus.
///
/// Body scanning runs once per note, across rayon workers when parallel
/// derivation is enabled; inbound sets are then produced by inverting the
/// scanned edges, so the whole build stays O(N·M).
pub struct GraphBuilder<'a> {
    index: &'a CorpusIndex,
    parallel: bool,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(index: &'a CorpusIndex) -> Self {
        Self {
            index,
            parallel: true,
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn build(&self) -> LinkGraph {
        let index = self.index;
        let notes = index.notes();

        let scanned: Vec<Vec<usize>> = if self.parallel {
            notes
                .par_iter()
                .map(|note| body_targets(index, note))
                .collect()
        } else {
            notes.iter().map(|note| body_targets(index, note)).collect()
        };

        let mut inbound: Vec<Vec<usize>> = vec![Vec::new(); notes.len()];
        for (source, targets) in scanned.iter().enumerate() {
            for &target in targets {
                inbound[target].push(source);
            }
        }

        let entries = notes
            .iter()
            .zip(scanned)
            .zip(inbound)
            .map(|((note, targets), sources)| {
                let links = match &note.outbound_links_override {
                    Some(_) => outbound(index, note),
                    None => targets
                        .into_iter()
                        .map(|target| index.note_at(target).to_resolved_link())
                        .collect(),
                };
                NoteLinks {
                    slug: note.slug.clone(),
                    outbound: links,
                    inbound: sources
                        .into_iter()
                        .map(|source| index.note_at(source).to_resolved_link())
                        .collect(),
                }
            })
            .collect();

        let graph = LinkGraph::from_entries(entries);
        log::info!(
            "Derived link graph: {} notes, {} outbound links",
            graph.len(),
            graph.total_links()
        );
        graph
    }
}

/// Derive the full graph with parallel body scanning.
pub fn build_graph(index: &CorpusIndex) -> LinkGraph {
    GraphBuilder::new(index).build()
}
