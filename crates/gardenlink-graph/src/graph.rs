//! Derived link graph for a corpus snapshot

use gardenlink_core::{ResolvedLink, normalize};
use petgraph::algo::kosaraju_scc;
use petgraph::prelude::*;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Outbound and inbound links of one note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteLinks {
    #[serde(skip)]
    pub slug: String,
    #[serde(rename = "outboundLinks")]
    pub outbound: Vec<ResolvedLink>,
    #[serde(rename = "backlinks")]
    pub inbound: Vec<ResolvedLink>,
}

/// Per-note link sets for a whole corpus, in corpus order.
///
/// Serializes as a JSON object keyed by slug:
/// `{"slug": {"outboundLinks": [...], "backlinks": [...]}}`.
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    entries: Vec<NoteLinks>,
    positions: HashMap<String, usize>,
}

impl LinkGraph {
    pub(crate) fn from_entries(entries: Vec<NoteLinks>) -> Self {
        let mut positions = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            positions.entry(normalize(&entry.slug)).or_insert(idx);
        }
        Self { entries, positions }
    }

    /// Link sets of one note
    pub fn get(&self, slug: &str) -> Option<&NoteLinks> {
        self.positions
            .get(&normalize(slug))
            .map(|&idx| &self.entries[idx])
    }

    /// Outbound links of a note, `None` if the slug is not in the corpus
    pub fn outbound(&self, slug: &str) -> Option<&[ResolvedLink]> {
        self.get(slug).map(|entry| entry.outbound.as_slice())
    }

    /// Backlinks of a note, `None` if the slug is not in the corpus
    pub fn inbound(&self, slug: &str) -> Option<&[ResolvedLink]> {
        self.get(slug).map(|entry| entry.inbound.as_slice())
    }

    /// All entries in corpus order
    pub fn entries(&self) -> &[NoteLinks] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of outbound links across all notes
    pub fn total_links(&self) -> usize {
        self.entries.iter().map(|entry| entry.outbound.len()).sum()
    }

    /// Notes with neither outbound links nor backlinks
    pub fn orphans(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.outbound.is_empty() && entry.inbound.is_empty())
            .map(|entry| entry.slug.as_str())
            .collect()
    }

    /// Strongly connected components with more than one note.
    ///
    /// Edges to slugs outside the corpus (possible through an outbound
    /// override) are ignored.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(self.entries.len(), 0);
        let nodes: Vec<NodeIndex> = (0..self.entries.len())
            .map(|idx| graph.add_node(idx))
            .collect();

        for (source, entry) in self.entries.iter().enumerate() {
            for link in &entry.outbound {
                if let Some(&target) = self.positions.get(&normalize(&link.slug)) {
                    graph.add_edge(nodes[source], nodes[target], ());
                }
            }
        }

        let mut components: Vec<Vec<String>> = kosaraju_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| {
                let mut members: Vec<usize> = scc.iter().map(|&node| graph[node]).collect();
                members.sort_unstable();
                members
                    .into_iter()
                    .map(|idx| self.entries[idx].slug.clone())
                    .collect()
            })
            .collect();
        components.sort();
        components
    }

    /// Summary statistics
    pub fn stats(&self) -> GraphStats {
        let total_notes = self.len();
        let total_links = self.total_links();

        let average_links_per_note = if total_notes > 0 {
            total_links as f64 / total_notes as f64
        } else {
            0.0
        };

        GraphStats {
            total_notes,
            total_links,
            orphaned_notes: self.orphans().len(),
            average_links_per_note,
        }
    }
}

impl Serialize for LinkGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.slug, entry)?;
        }
        map.end()
    }
}

/// Statistics about the graph
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub total_notes: usize,
    pub total_links: usize,
    pub orphaned_notes: usize,
    pub average_links_per_note: f64,
}
