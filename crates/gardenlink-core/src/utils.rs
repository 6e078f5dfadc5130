//! Shared helpers used across gardenlink crates.
//!
//! [`normalize`] is the single canonical key function: every comparison of
//! slugs, titles, aliases and raw link targets goes through it.

use crate::models::Note;
use crate::{Error, Result};
use std::collections::HashSet;

/// Canonical matching key: trimmed, lowercased, spaces replaced by hyphens.
///
/// ```
/// use gardenlink_core::normalize;
///
/// assert_eq!(normalize("My Note"), "my-note");
/// assert_eq!(normalize("  my note "), "my-note");
/// ```
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "-")
}

/// Every distinct topic across the corpus, in first-seen order.
pub fn all_topics(notes: &[Note]) -> Vec<String> {
    let mut seen = HashSet::new();
    notes
        .iter()
        .flat_map(|note| note.topics.iter())
        .filter(|topic| seen.insert(topic.as_str()))
        .cloned()
        .collect()
}

/// Generic JSON serialization with consistent error handling
pub fn to_json_string<T: serde::Serialize + ?Sized>(data: &T, context: &str) -> Result<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| Error::other(format!("Failed to serialize {} as JSON: {}", context, e)))
}
