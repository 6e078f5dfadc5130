//! # Corpus Loader
//!
//! Reads a digital garden's note files from disk into a corpus snapshot.
//!
//! - Walks the configured notes directory, honouring allowed extensions and
//!   excluded directory names
//! - Parses YAML frontmatter and body of each file
//! - Derives each slug from the file's relative path
//! - Skips unreadable or malformed files with a warning
//! - Returns notes sorted by slug so corpus order is deterministic
//!
//! ## Quick Start
//!
//! ```no_run
//! use gardenlink_core::prelude::*;
//! use gardenlink_vault::load_notes;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = GardenConfig::builder("src/content/notes").build()?;
//!     let notes = load_notes(&config).await?;
//!     println!("Loaded {} notes", notes.len());
//!     Ok(())
//! }
//! ```

pub mod loader;

pub use loader::{CorpusLoader, load_notes, load_notes_from_str};

pub mod prelude {
    pub use crate::loader::{CorpusLoader, load_notes, load_notes_from_str};
    pub use gardenlink_core::prelude::*;
}
