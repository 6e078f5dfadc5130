//! Wiki-link scanner: `[[target]]` and `[[target|label]]`
//!
//! A scan partitions a span into literal text runs and link tokens in a single
//! left-to-right pass. Labels are never re-scanned, so `[[a|[[b]]]]` yields
//! one token and no nested link.

use gardenlink_core::LinkToken;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Matches `[[target]]` or `[[target|label]]` on a single line.
///
/// The target is the shortest run before the first `|`; the label is the
/// shortest run before the closing `]]`.
static WIKILINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[(.*?)(?:\|(.*?))?\]\]").unwrap());

/// One piece of a scanned span
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text, emitted unchanged
    Text(Cow<'a, str>),
    /// A wiki-link with a non-empty target
    Link(LinkToken),
}

impl Segment<'_> {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Segment::Text(text) => Some(text),
            Segment::Link(_) => None,
        }
    }

    pub fn as_link(&self) -> Option<&LinkToken> {
        match self {
            Segment::Text(_) => None,
            Segment::Link(token) => Some(token),
        }
    }
}

/// Fast pre-filter: skip the regex when no opening delimiter is present.
#[inline]
pub fn has_wikilink(span: &str) -> bool {
    span.contains("[[")
}

/// Scan a span into alternating text runs and link tokens.
///
/// Delimited text with an empty (or whitespace-only) target is not a link; it
/// is emitted as text showing the label if one is given, else the raw match.
/// Adjacent text runs are merged. An empty span yields no segments.
///
/// ```
/// use gardenlink_parser::scanner::{scan, Segment};
///
/// let segments = scan("A [[B]] C");
/// assert_eq!(segments.len(), 3);
/// assert_eq!(segments[0].as_text(), Some("A "));
/// assert_eq!(segments[1].as_link().unwrap().raw_target, "B");
/// assert_eq!(segments[2].as_text(), Some(" C"));
/// ```
pub fn scan(span: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();

    if !has_wikilink(span) {
        push_text(&mut segments, span);
        return segments;
    }

    let mut last_end = 0;
    for caps in WIKILINK.captures_iter(span) {
        let Some(whole) = caps.get(0) else {
            continue;
        };

        push_text(&mut segments, &span[last_end..whole.start()]);

        let target = caps.get(1).map_or("", |m| m.as_str());
        let label = caps
            .get(2)
            .map(|m| m.as_str())
            .filter(|label| !label.is_empty());

        if target.trim().is_empty() {
            push_text(&mut segments, label.unwrap_or(whole.as_str()));
        } else {
            segments.push(Segment::Link(LinkToken {
                raw_target: target.to_string(),
                label: label.map(str::to_string),
                start_offset: whole.start(),
                end_offset: whole.end(),
            }));
        }

        last_end = whole.end();
    }

    push_text(&mut segments, &span[last_end..]);
    segments
}

/// Link tokens of a span, in order of appearance.
pub fn tokens(span: &str) -> Vec<LinkToken> {
    scan(span)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Link(token) => Some(token),
            Segment::Text(_) => None,
        })
        .collect()
}

fn push_text<'a>(segments: &mut Vec<Segment<'a>>, text: &'a str) {
    if text.is_empty() {
        return;
    }

    if let Some(Segment::Text(previous)) = segments.last_mut() {
        previous.to_mut().push_str(text);
    } else {
        segments.push(Segment::Text(Cow::Borrowed(text)));
    }
}
