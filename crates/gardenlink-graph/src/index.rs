//! Corpus index: O(1) resolution of raw link targets to notes.
//!
//! Built once per corpus snapshot. Three maps share one key function
//! ([`normalize`]): slug, title and alias. Resolution checks them in that
//! order and the first hit wins. Every map is first-registered-wins; later
//! claims on a key are reported in the [`IntegrityReport`] and ignored.

use gardenlink_core::{
    IntegrityIssue, IntegrityReport, IssueKind, LinkResolver, Note, ResolvedLink, normalize,
};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Read-only lookup structure over a corpus snapshot
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    notes: Vec<Note>,
    by_slug: HashMap<String, usize>,
    by_title: HashMap<String, usize>,
    by_alias: HashMap<String, usize>,
}

impl CorpusIndex {
    /// Index a corpus, returning integrity issues found on the way.
    pub fn build(notes: Vec<Note>) -> (Self, IntegrityReport) {
        let mut report = IntegrityReport::new();
        let mut by_slug = HashMap::with_capacity(notes.len());
        let mut by_title = HashMap::with_capacity(notes.len());
        let mut by_alias = HashMap::new();

        for (idx, note) in notes.iter().enumerate() {
            let key = normalize(&note.slug);
            match by_slug.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
                Entry::Occupied(slot) => {
                    let owner: &Note = &notes[*slot.get()];
                    report.add_issue(IntegrityIssue::new(
                        IssueKind::DuplicateSlug,
                        &note.slug,
                        slot.key(),
                        format!(
                            "Duplicate slug '{}': note '{}' is shadowed by '{}'",
                            slot.key(),
                            note.title,
                            owner.title
                        ),
                    ));
                }
            }
        }

        for (idx, note) in notes.iter().enumerate() {
            let key = normalize(&note.title);
            if key.is_empty() {
                continue;
            }
            match by_title.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
                Entry::Occupied(slot) if *slot.get() != idx => {
                    let owner: &Note = &notes[*slot.get()];
                    report.add_issue(IntegrityIssue::new(
                        IssueKind::TitleCollision,
                        &note.slug,
                        slot.key(),
                        format!(
                            "Title '{}' of '{}' already belongs to '{}'",
                            note.title, note.slug, owner.slug
                        ),
                    ));
                }
                Entry::Occupied(_) => {}
            }
        }

        for (idx, note) in notes.iter().enumerate() {
            for alias in &note.aliases {
                let key = normalize(alias);
                if key.is_empty() {
                    continue;
                }
                match by_alias.entry(key) {
                    Entry::Vacant(slot) => {
                        slot.insert(idx);
                    }
                    Entry::Occupied(slot) if *slot.get() != idx => {
                        let owner: &Note = &notes[*slot.get()];
                        report.add_issue(IntegrityIssue::new(
                            IssueKind::AliasCollision,
                            &note.slug,
                            slot.key(),
                            format!(
                                "Alias '{}' of '{}' already registered by '{}'",
                                alias, note.slug, owner.slug
                            ),
                        ));
                    }
                    Entry::Occupied(_) => {}
                }
            }
        }

        log::info!(
            "Indexed {} notes ({} titles, {} aliases, {} integrity issues)",
            notes.len(),
            by_title.len(),
            by_alias.len(),
            report.issues.len()
        );

        let index = Self {
            notes,
            by_slug,
            by_title,
            by_alias,
        };
        (index, report)
    }

    /// Position of the note a raw target resolves to (slug > title > alias).
    pub fn resolve_position(&self, raw_target: &str) -> Option<usize> {
        let key = normalize(raw_target);
        if key.is_empty() {
            return None;
        }

        self.by_slug
            .get(&key)
            .or_else(|| self.by_title.get(&key))
            .or_else(|| self.by_alias.get(&key))
            .copied()
    }

    /// Note a raw target resolves to
    pub fn resolve_note(&self, raw_target: &str) -> Option<&Note> {
        self.resolve_position(raw_target).map(|idx| &self.notes[idx])
    }

    /// Resolve a raw target into a link record
    pub fn resolve(&self, raw_target: &str) -> Option<ResolvedLink> {
        self.resolve_note(raw_target).map(Note::to_resolved_link)
    }

    /// Position of a note by slug only (no title or alias fallback)
    pub fn position(&self, slug: &str) -> Option<usize> {
        self.by_slug.get(&normalize(slug)).copied()
    }

    /// Note by slug only
    pub fn get(&self, slug: &str) -> Option<&Note> {
        self.position(slug).map(|idx| &self.notes[idx])
    }

    /// All notes in corpus order
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note_at(&self, idx: usize) -> &Note {
        &self.notes[idx]
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl LinkResolver for CorpusIndex {
    fn resolve(&self, raw_target: &str) -> Option<ResolvedLink> {
        CorpusIndex::resolve(self, raw_target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gardenlink_core::GrowthStage;

    fn note(slug: &str, title: &str) -> Note {
        Note::new(slug, title, GrowthStage::Seedling)
    }

    #[test]
    fn test_resolve_by_slug_title_alias() {
        let (index, report) = CorpusIndex::build(vec![
            note("rust-ownership", "Ownership in Rust").with_aliases(["Borrowing"]),
        ]);
        assert!(report.is_empty());

        for raw in ["rust-ownership", "Rust Ownership", "ownership in rust", "Borrowing"] {
            assert_eq!(
                index.resolve(raw).map(|l| l.slug),
                Some("rust-ownership".to_string()),
                "raw target {raw}"
            );
        }
        assert!(index.resolve("NoSuchNote").is_none());
    }

    #[test]
    fn test_alias_is_case_insensitive() {
        let (index, _) = CorpusIndex::build(vec![note("a", "A").with_aliases(["Foo"])]);
        assert_eq!(index.resolve("foo").unwrap().slug, "a");
        assert_eq!(index.resolve("FOO").unwrap().slug, "a");
    }

    #[test]
    fn test_priority_slug_over_title_over_alias() {
        let (index, _) = CorpusIndex::build(vec![
            note("alpha", "Beta").with_aliases(["gamma"]),
            note("beta", "Gamma").with_aliases(["alpha"]),
            note("gamma", "Delta"),
        ]);

        // Slug beats another note's alias
        assert_eq!(index.resolve("alpha").unwrap().slug, "alpha");
        // Slug beats another note's title
        assert_eq!(index.resolve("beta").unwrap().slug, "beta");
        assert_eq!(index.resolve("gamma").unwrap().slug, "gamma");
        // Title beats alias when no slug matches
        assert_eq!(index.resolve("delta").unwrap().slug, "gamma");
    }

    #[test]
    fn test_title_beats_alias() {
        let (index, _) = CorpusIndex::build(vec![
            note("one", "One").with_aliases(["Shared Name"]),
            note("two", "Shared Name"),
        ]);
        assert_eq!(index.resolve("shared name").unwrap().slug, "two");
    }

    #[test]
    fn test_alias_collision_first_wins_with_warning() {
        let (index, report) = CorpusIndex::build(vec![
            note("a", "A").with_aliases(["Foo"]),
            note("b", "B").with_aliases(["foo"]),
        ]);

        assert_eq!(index.resolve("Foo").unwrap().slug, "a");
        let collisions = report.issues_of_kind(IssueKind::AliasCollision);
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].slug, "b");
        assert_eq!(collisions[0].key, "foo");
    }

    #[test]
    fn test_repeated_alias_on_same_note_is_not_a_collision() {
        let (_, report) = CorpusIndex::build(vec![note("a", "A").with_aliases(["Foo", "foo"])]);
        assert!(report.is_empty());
    }

    #[test]
    fn test_duplicate_slug_reported() {
        let (index, report) = CorpusIndex::build(vec![note("a", "First"), note("a", "Second")]);
        assert_eq!(index.get("a").unwrap().title, "First");
        assert_eq!(report.issues_of_kind(IssueKind::DuplicateSlug).len(), 1);
        assert_eq!(report.summary.error_count, 1);
    }

    #[test]
    fn test_blank_target_never_resolves() {
        let (index, _) = CorpusIndex::build(vec![note("a", "A")]);
        assert!(index.resolve("   ").is_none());
    }

    #[test]
    fn test_description_defaults_to_empty() {
        let (index, _) = CorpusIndex::build(vec![
            note("a", "A"),
            note("b", "B").with_description("Bee"),
        ]);
        assert_eq!(index.resolve("a").unwrap().description, "");
        assert_eq!(index.resolve("b").unwrap().description, "Bee");
    }
}
