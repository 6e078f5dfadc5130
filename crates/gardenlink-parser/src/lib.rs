//! # Gardenlink Parser
//!
//! Wiki-link scanning and document rewriting built on `pulldown-cmark`.
//!
//! This crate provides:
//! - A single-pass scanner that partitions a text span into literal runs and
//!   `[[target]]` / `[[target|label]]` tokens
//! - A span rewriter that turns tokens into link nodes through any
//!   [`LinkResolver`](gardenlink_core::LinkResolver)
//! - A Markdown adapter that applies the rewriter to every text event outside
//!   code, then renders HTML
//! - Note document parsing (YAML frontmatter + body)
//!
//! The scanner knows nothing about documents or notes. The rewriter knows
//! nothing about how the corpus is indexed. The graph crate supplies the
//! resolver.
//!
//! ## Quick Start
//!
//! ```
//! use gardenlink_parser::{scan, tokens, Segment};
//!
//! let segments = scan("Read [[Rust Ownership|ownership]] first.");
//! assert_eq!(segments.len(), 3);
//!
//! let links = tokens("[[A]] then [[B|bee]]");
//! assert_eq!(links[1].raw_target, "B");
//! assert_eq!(links[1].label.as_deref(), Some("bee"));
//! ```
//!
//! ## Rewriting
//!
//! ```
//! use gardenlink_core::{GrowthStage, LinkResolver, Note, ResolvedLink, normalize};
//! use gardenlink_parser::Rewriter;
//!
//! struct One(ResolvedLink);
//!
//! impl LinkResolver for One {
//!     fn resolve(&self, raw: &str) -> Option<ResolvedLink> {
//!         (normalize(raw) == self.0.slug).then(|| self.0.clone())
//!     }
//! }
//!
//! let resolver = One(Note::new("rust", "Rust", GrowthStage::Budding).to_resolved_link());
//! let html = Rewriter::new(&resolver).render_span("[[Rust]] and [[Go]]");
//! assert_eq!(html, r#"<a href="/notes/rust" class="wiki-link">Rust</a> and Go"#);
//! ```

pub mod frontmatter;
pub mod rewrite;
pub mod scanner;

pub use frontmatter::{NoteFrontmatter, parse_frontmatter, parse_note, split_frontmatter};
pub use rewrite::{Rewriter, render_markdown, render_nodes, rewrite_span};
pub use scanner::{Segment, has_wikilink, scan, tokens};

/// Convenient prelude for common imports.
pub mod prelude {
    pub use gardenlink_core::{LinkResolver, LinkToken, Node, RenderOptions};

    pub use crate::{
        Rewriter, Segment, has_wikilink, parse_note, render_markdown, render_nodes,
        rewrite_span, scan, split_frontmatter, tokens,
    };
}
