//! Note documents: `---\nYAML\n---\nbody`
//!
//! The frontmatter schema mirrors the garden's content collection. Schema
//! validation beyond what deserialization needs is left to the content loader
//! upstream.

use gardenlink_core::{Error, GrowthStage, Note, NoteType, ResolvedLink, Result};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

/// Matches YAML frontmatter at the very start of a document
static FRONTMATTER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^---[ \t]*\r?\n([\s\S]*?)\r?\n---[ \t]*(?:\r?\n|$)").unwrap());

/// Frontmatter fields of a note file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteFrontmatter {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default, rename = "type")]
    pub note_type: NoteType,
    #[serde(default)]
    pub topics: Vec<String>,
    pub growth_stage: GrowthStage,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub outbound_links: Option<Vec<ResolvedLink>>,
}

impl NoteFrontmatter {
    /// Combine with a slug and body into a corpus note
    pub fn into_note(self, slug: impl Into<String>, body: impl Into<String>) -> Note {
        Note {
            slug: slug.into(),
            title: self.title,
            description: self.description,
            aliases: self.aliases,
            growth_stage: self.growth_stage,
            topics: self.topics,
            body: body.into(),
            outbound_links_override: self.outbound_links,
            note_type: self.note_type,
            start_date: self.start_date,
            updated: self.updated,
            featured: self.featured,
        }
    }
}

/// Split a document into `(frontmatter, body)`.
///
/// Returns `None` for the frontmatter when the document does not open with a
/// complete `---` block; the body is then the whole document.
pub fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    match FRONTMATTER_PATTERN.captures(content) {
        Some(caps) => {
            let (Some(whole), Some(yaml)) = (caps.get(0), caps.get(1)) else {
                return (None, content);
            };
            (Some(yaml.as_str()), &content[whole.end()..])
        }
        None => (None, content),
    }
}

/// Parse the frontmatter block of a document
pub fn parse_frontmatter(yaml: &str) -> Result<NoteFrontmatter> {
    serde_yaml::from_str(yaml)
        .map_err(|e| Error::parse_error(format!("Invalid note frontmatter: {}", e)))
}

/// Parse a complete note document under the given slug.
///
/// ```
/// use gardenlink_parser::parse_note;
///
/// let doc = "---\ntitle: Rust\ngrowthStage: budding\naliases: [Rustlang]\n---\nSee [[Ownership]].";
/// let note = parse_note("rust", doc).unwrap();
/// assert_eq!(note.title, "Rust");
/// assert_eq!(note.aliases, vec!["Rustlang"]);
/// assert_eq!(note.body, "See [[Ownership]].");
/// ```
pub fn parse_note(slug: &str, content: &str) -> Result<Note> {
    let (yaml, body) = split_frontmatter(content);
    let yaml = yaml.ok_or_else(|| {
        Error::parse_error(format!("Note '{}' has no frontmatter block", slug))
    })?;

    let frontmatter = parse_frontmatter(yaml).map_err(|e| match e {
        Error::ParseError { reason } => {
            Error::parse_error(format!("{} (note '{}')", reason, slug))
        }
        other => other,
    })?;
    Ok(frontmatter.into_note(slug, body))
}
