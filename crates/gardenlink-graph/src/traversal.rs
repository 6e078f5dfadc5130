//! Bounded multi-hop traversal with cycle detection.
//!
//! Traversal follows resolved outbound links (overrides included) from a start
//! note up to a depth budget. Each branch carries its own active path, which is
//! the visited-set for that branch: a hop into a note already on the path is
//! reported as a cycle and not descended. All state lives on an explicit work
//! stack allocated per call, so recursion depth never depends on the corpus.

use crate::builder::outbound;
use crate::index::CorpusIndex;
use gardenlink_core::{Error, ResolvedLink, Result};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One note reached during a traversal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hop {
    pub link: ResolvedLink,
    /// Number of links followed from the start note (1 for direct links)
    pub depth: usize,
    /// Slug of the note whose outbound link led here
    pub via: String,
}

/// A link that points back at a note already on the active path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CycleEdge {
    pub from: String,
    pub to: String,
}

/// Result of a bounded outbound traversal
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Traversal {
    pub start: String,
    pub max_depth: usize,
    /// Every note reached, once each, at the smallest depth it was seen
    pub hops: Vec<Hop>,
    pub cycle_detected: bool,
    pub cycles: Vec<CycleEdge>,
}

impl Traversal {
    /// Slugs of all reached notes in discovery order
    pub fn slugs(&self) -> Vec<&str> {
        self.hops.iter().map(|hop| hop.link.slug.as_str()).collect()
    }
}

struct Frame {
    node: usize,
    path: Vec<usize>,
    remaining: usize,
}

/// Follow outbound links from `slug` for at most `max_depth` hops.
///
/// A depth budget of zero returns an empty traversal. A note is expanded once
/// per distinct path that reaches it, so every link that closes back onto the
/// active path within the budget is reported.
pub fn traverse_outbound(index: &CorpusIndex, slug: &str, max_depth: usize) -> Result<Traversal> {
    let start = index.position(slug).ok_or_else(|| Error::not_found(slug))?;
    let start_slug = index.note_at(start).slug.clone();

    let mut hops: Vec<Hop> = Vec::new();
    let mut hop_at: HashMap<String, usize> = HashMap::new();
    let mut cycles: Vec<CycleEdge> = Vec::new();
    let mut seen_cycles: HashSet<CycleEdge> = HashSet::new();

    let mut stack = vec![Frame {
        node: start,
        path: vec![start],
        remaining: max_depth,
    }];

    while let Some(Frame {
        node,
        path,
        remaining,
    }) = stack.pop()
    {
        if remaining == 0 {
            continue;
        }
        let source = index.note_at(node);
        let depth = max_depth - remaining + 1;
        let mut children = Vec::new();

        for link in outbound(index, source) {
            let target = index.position(&link.slug);

            if let Some(target) = target
                && path.contains(&target)
            {
                let edge = CycleEdge {
                    from: source.slug.clone(),
                    to: index.note_at(target).slug.clone(),
                };
                log::debug!("Cycle detected: {} -> {}", edge.from, edge.to);
                if seen_cycles.insert(edge.clone()) {
                    cycles.push(edge);
                }
                continue;
            }

            match hop_at.get(&link.slug) {
                Some(&at) if hops[at].depth <= depth => {}
                Some(&at) => {
                    hops[at].depth = depth;
                    hops[at].via = source.slug.clone();
                }
                None => {
                    hop_at.insert(link.slug.clone(), hops.len());
                    hops.push(Hop {
                        link: link.clone(),
                        depth,
                        via: source.slug.clone(),
                    });
                }
            }

            if let Some(target) = target {
                let mut next_path = path.clone();
                next_path.push(target);
                children.push(Frame {
                    node: target,
                    path: next_path,
                    remaining: remaining - 1,
                });
            }
        }

        // Reverse so the first outbound link is expanded first
        stack.extend(children.into_iter().rev());
    }

    Ok(Traversal {
        start: start_slug,
        max_depth,
        cycle_detected: !cycles.is_empty(),
        hops,
        cycles,
    })
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Grey,
    Black,
}

/// True if outbound links from `slug` ever lead back to a note on the path.
pub fn detect_cycle_from(index: &CorpusIndex, slug: &str) -> Result<bool> {
    let start = index.position(slug).ok_or_else(|| Error::not_found(slug))?;

    let targets = |node: usize| -> Vec<usize> {
        outbound(index, index.note_at(node))
            .iter()
            .filter_map(|link| index.position(&link.slug))
            .collect()
    };

    let mut color = vec![Color::White; index.len()];
    let mut stack: Vec<(usize, Vec<usize>, usize)> = vec![(start, targets(start), 0)];
    color[start] = Color::Grey;

    while let Some((node, children, next)) = stack.last_mut() {
        let Some(&child) = children.get(*next) else {
            color[*node] = Color::Black;
            stack.pop();
            continue;
        };
        *next += 1;

        match color[child] {
            Color::Grey => {
                log::debug!(
                    "Circular reference: {} -> {}",
                    index.note_at(*node).slug,
                    index.note_at(child).slug
                );
                return Ok(true);
            }
            Color::Black => {}
            Color::White => {
                color[child] = Color::Grey;
                stack.push((child, targets(child), 0));
            }
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gardenlink_core::{GrowthStage, Note};

    fn note(slug: &str, body: &str) -> Note {
        Note::new(slug, slug.to_uppercase(), GrowthStage::Budding).with_body(body)
    }

    fn index(notes: Vec<Note>) -> CorpusIndex {
        CorpusIndex::build(notes).0
    }

    #[test]
    fn test_two_note_cycle_reported_on_second_hop() {
        let index = index(vec![note("a", "[[b]]"), note("b", "[[a]]")]);
        let traversal = traverse_outbound(&index, "a", 2).unwrap();

        assert!(traversal.cycle_detected);
        assert_eq!(traversal.slugs(), vec!["b"]);
        assert_eq!(
            traversal.cycles,
            vec![CycleEdge {
                from: "b".to_string(),
                to: "a".to_string()
            }]
        );
    }

    #[test]
    fn test_depth_one_sees_no_cycle() {
        let index = index(vec![note("a", "[[b]]"), note("b", "[[a]]")]);
        let traversal = traverse_outbound(&index, "a", 1).unwrap();
        assert!(!traversal.cycle_detected);
        assert_eq!(traversal.slugs(), vec!["b"]);
    }

    #[test]
    fn test_zero_budget_is_empty() {
        let index = index(vec![note("a", "[[b]]"), note("b", "")]);
        let traversal = traverse_outbound(&index, "a", 0).unwrap();
        assert!(traversal.hops.is_empty());
        assert!(!traversal.cycle_detected);
    }

    #[test]
    fn test_chain_respects_depth_budget() {
        let index = index(vec![
            note("a", "[[b]]"),
            note("b", "[[c]]"),
            note("c", "[[d]]"),
            note("d", ""),
        ]);
        let traversal = traverse_outbound(&index, "a", 2).unwrap();
        assert_eq!(traversal.slugs(), vec!["b", "c"]);
        assert_eq!(traversal.hops[1].depth, 2);
        assert_eq!(traversal.hops[1].via, "b");
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let index = index(vec![
            note("a", "[[b]] [[c]]"),
            note("b", "[[d]]"),
            note("c", "[[d]]"),
            note("d", ""),
        ]);
        let traversal = traverse_outbound(&index, "a", 5).unwrap();
        assert!(!traversal.cycle_detected);
        assert_eq!(traversal.slugs(), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_cycle_closed_only_on_second_path() {
        let index = index(vec![
            note("start", "[[side]] [[loop-a]]"),
            note("side", "[[loop-b]]"),
            note("loop-a", "[[loop-b]]"),
            note("loop-b", "[[loop-a]]"),
        ]);
        let traversal = traverse_outbound(&index, "start", 3).unwrap();

        assert!(traversal.cycle_detected);
        assert_eq!(traversal.slugs(), vec!["side", "loop-a", "loop-b"]);
        let loop_b = traversal.hops.iter().find(|h| h.link.slug == "loop-b").unwrap();
        assert_eq!(loop_b.depth, 2);
    }

    #[test]
    fn test_all_closing_edges_reported() {
        let index = index(vec![
            note("start", "[[side]] [[loop-a]]"),
            note("side", "[[loop-b]]"),
            note("loop-a", "[[loop-b]]"),
            note("loop-b", "[[loop-a]]"),
        ]);
        let traversal = traverse_outbound(&index, "start", 4).unwrap();

        let edges: HashSet<(&str, &str)> = traversal
            .cycles
            .iter()
            .map(|edge| (edge.from.as_str(), edge.to.as_str()))
            .collect();
        assert_eq!(
            edges,
            HashSet::from([("loop-b", "loop-a"), ("loop-a", "loop-b")])
        );
        assert_eq!(traversal.cycles.len(), 2);
    }

    #[test]
    fn test_hop_keeps_smallest_depth() {
        let index = index(vec![
            note("a", "[[b]] [[c]]"),
            note("b", "[[c]]"),
            note("c", ""),
        ]);
        let traversal = traverse_outbound(&index, "a", 3).unwrap();
        let c = traversal.hops.iter().find(|h| h.link.slug == "c").unwrap();
        assert_eq!(c.depth, 1);
        assert_eq!(c.via, "a");
    }

    #[test]
    fn test_long_cycle_stops_without_recursion() {
        let notes: Vec<Note> = (0..200)
            .map(|i| note(&format!("n{i}"), &format!("[[n{}]]", (i + 1) % 200)))
            .collect();
        let index = index(notes);
        let traversal = traverse_outbound(&index, "n0", 1_000).unwrap();
        assert!(traversal.cycle_detected);
        assert_eq!(traversal.hops.len(), 199);
    }

    #[test]
    fn test_traversal_follows_override() {
        let c = Note::new("c", "C", GrowthStage::Seedling).to_resolved_link();
        let a = note("a", "[[b]]").with_outbound_override(vec![c]);
        let index = index(vec![a, note("b", ""), note("c", "")]);
        assert_eq!(traverse_outbound(&index, "a", 1).unwrap().slugs(), vec!["c"]);
    }

    #[test]
    fn test_unknown_start_is_not_found() {
        let index = index(vec![note("a", "")]);
        assert!(matches!(
            traverse_outbound(&index, "zzz", 1),
            Err(Error::NoteNotFound { .. })
        ));
        assert!(detect_cycle_from(&index, "zzz").is_err());
    }

    #[test]
    fn test_detect_cycle_from() {
        let index = index(vec![
            note("a", "[[b]]"),
            note("b", "[[c]]"),
            note("c", "[[b]]"),
            note("d", "[[a]]"),
            note("e", "[[f]]"),
            note("f", ""),
        ]);
        assert!(detect_cycle_from(&index, "a").unwrap());
        assert!(detect_cycle_from(&index, "d").unwrap());
        assert!(!detect_cycle_from(&index, "e").unwrap());
        assert!(!detect_cycle_from(&index, "f").unwrap());
    }

    #[test]
    fn test_detect_cycle_ignores_diamonds_and_self_links() {
        let index = index(vec![
            note("a", "[[a]] [[b]] [[c]]"),
            note("b", "[[d]]"),
            note("c", "[[d]]"),
            note("d", ""),
        ]);
        assert!(!detect_cycle_from(&index, "a").unwrap());
    }
}
