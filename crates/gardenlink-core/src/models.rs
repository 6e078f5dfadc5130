//! Core data models for a digital-garden corpus.
//!
//! These types are designed to be:
//! - **Serializable**: All types derive Serialize/Deserialize
//! - **Immutable once loaded**: the corpus snapshot is never mutated in place
//! - **Type-Safe**: Enums replace magic strings (growth stage, note type)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Maturity classification of a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthStage {
    Seedling,
    Budding,
    Evergreen,
}

impl GrowthStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seedling => "seedling",
            Self::Budding => "budding",
            Self::Evergreen => "evergreen",
        }
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrowthStage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seedling" => Ok(Self::Seedling),
            "budding" => Ok(Self::Budding),
            "evergreen" => Ok(Self::Evergreen),
            other => Err(Error::parse_error(format!(
                "Unknown growth stage '{}': expected seedling, budding or evergreen",
                other
            ))),
        }
    }
}

/// Kind of garden entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    #[default]
    Note,
    Essay,
}

/// A note in the corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique, canonical identity key
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub growth_stage: GrowthStage,
    #[serde(default)]
    pub topics: Vec<String>,
    /// Raw markup text, frontmatter already stripped
    #[serde(default)]
    pub body: String,
    /// Precomputed outbound list that replaces the derived one when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outbound_links_override: Option<Vec<ResolvedLink>>,
    #[serde(default, rename = "type")]
    pub note_type: NoteType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

impl Note {
    /// Create a note with the required fields; everything else is empty.
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        growth_stage: GrowthStage,
    ) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            description: None,
            aliases: Vec::new(),
            growth_stage,
            topics: Vec::new(),
            body: String::new(),
            outbound_links_override: None,
            note_type: NoteType::Note,
            start_date: None,
            updated: None,
            featured: false,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_outbound_override(mut self, links: Vec<ResolvedLink>) -> Self {
        self.outbound_links_override = Some(links);
        self
    }

    /// The link record other notes see when they point at this one.
    pub fn to_resolved_link(&self) -> ResolvedLink {
        ResolvedLink {
            title: self.title.clone(),
            slug: self.slug.clone(),
            growth_stage: self.growth_stage,
            description: self.description.clone().unwrap_or_default(),
        }
    }
}

/// A `[[target]]` or `[[target|label]]` occurrence within a scanned span.
///
/// Offsets are byte offsets into the span; `end_offset` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkToken {
    pub raw_target: String,
    pub label: Option<String>,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl LinkToken {
    /// Text shown for the token: the label when present, else the raw target.
    pub fn display_text(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.raw_target)
    }
}

/// A token target resolved to a note in the corpus
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLink {
    pub title: String,
    pub slug: String,
    pub growth_stage: GrowthStage,
    #[serde(default)]
    pub description: String,
}

/// A node produced by rewriting a text span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Text { value: String },
    Link {
        slug: String,
        label: String,
        class: String,
    },
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
        }
    }
}

/// Maps a raw wiki-link target to a note identity.
///
/// This is the seam between the document rewriter and the corpus index, so
/// the rewriter can be exercised against any lookup.
pub trait LinkResolver {
    /// Resolve a raw target, or `None` when nothing in the corpus matches.
    fn resolve(&self, raw_target: &str) -> Option<ResolvedLink>;
}

impl<R: LinkResolver + ?Sized> LinkResolver for &R {
    fn resolve(&self, raw_target: &str) -> Option<ResolvedLink> {
        (**self).resolve(raw_target)
    }
}

impl<R: LinkResolver + ?Sized> LinkResolver for std::sync::Arc<R> {
    fn resolve(&self, raw_target: &str) -> Option<ResolvedLink> {
        (**self).resolve(raw_target)
    }
}
