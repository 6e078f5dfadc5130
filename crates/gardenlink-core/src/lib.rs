//! # Gardenlink Core
//!
//! Core data models, error types, and configuration for the wiki-link engine.
//! This crate defines the canonical types that all other crates depend on.
//!
//! ## Architecture Principles
//!
//! - **One normalization rule**: [`normalize`] is the only key function used
//!   for slugs, titles, aliases and raw link targets
//! - **Zero Panic in Libraries**: All errors are `Result<T, Error>`
//! - **Immutable Snapshots**: Notes are never mutated once a corpus is loaded
//! - **Trait at the seam**: [`LinkResolver`] decouples document rewriting from
//!   the corpus index
//!
//! ## Core Modules
//!
//! - [`models`] - Note, LinkToken, ResolvedLink, Node
//! - [`error`] - Error type and Result alias
//! - [`config`] - Engine configuration and render options
//! - [`profiles`] - Configuration presets
//! - [`integrity`] - Non-fatal corpus integrity reporting
//! - [`utils`] - Normalization and small helpers
//!
//! ## Usage
//!
//! ```
//! use gardenlink_core::prelude::*;
//!
//! let note = Note::new("my-note", "My Note", GrowthStage::Seedling)
//!     .with_aliases(["Mine"])
//!     .with_body("Links to [[Other Note]].");
//!
//! assert_eq!(normalize(&note.title), note.slug);
//! assert_eq!(note.to_resolved_link().description, "");
//! ```

pub mod config;
pub mod error;
pub mod integrity;
pub mod models;
pub mod profiles;
pub mod utils;

pub use config::*;
pub use error::{Error, Result};
pub use integrity::{IntegrityIssue, IntegrityReport, IntegritySummary, IssueKind, Severity};
pub use models::*;
pub use profiles::ConfigProfile;
pub use utils::{all_topics, normalize, to_json_string};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{GardenConfig, RenderOptions};
    pub use crate::error::{Error, Result};
    pub use crate::integrity::{IntegrityIssue, IntegrityReport, IssueKind, Severity};
    pub use crate::models::{
        GrowthStage, LinkResolver, LinkToken, Node, Note, NoteType, ResolvedLink,
    };
    pub use crate::profiles::ConfigProfile;
    pub use crate::utils::{all_topics, normalize};
}
