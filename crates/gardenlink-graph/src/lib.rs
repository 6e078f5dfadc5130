//! # Link Graph Analysis
//!
//! Corpus indexing, backlink graph derivation and bounded traversal for
//! wiki-linked notes.
//!
//! Provides:
//! - O(1) resolution of raw targets by slug, title or alias
//! - Per-note outbound and inbound link sets
//! - Whole-corpus graph derivation across `rayon` workers
//! - Multi-hop traversal with a depth budget and cycle signal
//! - Cycle detection (`petgraph` strongly connected components)
//! - Orphans, statistics and broken link detection
//! - [`LinkEngine`], a facade holding one loaded snapshot
//!
//! ## Quick Start
//!
//! ```
//! use gardenlink_graph::prelude::*;
//!
//! let mut engine = LinkEngine::new(GardenConfig::default());
//! engine.load(vec![
//!     Note::new("rust", "Rust", GrowthStage::Budding).with_body("See [[Ownership]]."),
//!     Note::new("ownership", "Ownership", GrowthStage::Seedling),
//! ]);
//!
//! let backlinks = engine.backlinks("ownership").unwrap();
//! assert_eq!(backlinks[0].slug, "rust");
//! ```
//!
//! ## Working without the facade
//!
//! ```
//! use gardenlink_graph::{CorpusIndex, build_graph, traverse_outbound};
//! use gardenlink_core::{GrowthStage, Note};
//!
//! let (index, report) = CorpusIndex::build(vec![
//!     Note::new("a", "A", GrowthStage::Seedling).with_body("[[b]]"),
//!     Note::new("b", "B", GrowthStage::Seedling).with_body("[[a]]"),
//! ]);
//! assert!(report.is_empty());
//!
//! let graph = build_graph(&index);
//! assert_eq!(graph.cycles().len(), 1);
//!
//! let traversal = traverse_outbound(&index, "a", 2).unwrap();
//! assert!(traversal.cycle_detected);
//! ```
//!
//! ## Performance Characteristics
//!
//! - Index construction: O(n + a) for n notes and a aliases
//! - Resolution: O(1) per raw target
//! - Graph derivation: O(n * m) for average body length m, one scan per body
//! - Per-note inbound query: O(n * m)
//! - Cycle detection from a note: O(n + e)

pub mod builder;
pub mod engine;
pub mod graph;
pub mod health;
pub mod index;
pub mod traversal;

pub use builder::{GraphBuilder, build_graph, inbound, outbound};
pub use engine::LinkEngine;
pub use graph::{GraphStats, LinkGraph, NoteLinks};
pub use health::{BrokenLink, HealthAnalyzer, HealthReport, broken_links};
pub use index::CorpusIndex;
pub use traversal::{CycleEdge, Hop, Traversal, detect_cycle_from, traverse_outbound};

pub mod prelude {
    pub use crate::builder::{GraphBuilder, build_graph};
    pub use crate::engine::LinkEngine;
    pub use crate::graph::{GraphStats, LinkGraph};
    pub use crate::health::{BrokenLink, HealthReport};
    pub use crate::index::CorpusIndex;
    pub use crate::traversal::{Traversal, detect_cycle_from, traverse_outbound};
    pub use gardenlink_core::prelude::*;
}
