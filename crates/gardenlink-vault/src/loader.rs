//! Corpus loader: note files on disk into an ordered `Vec<Note>`

use gardenlink_core::prelude::*;
use gardenlink_parser::parse_note;
use std::path::{Component, Path, PathBuf};
use tracing::instrument;
use walkdir::WalkDir;

/// Loads every note file under a configured directory
pub struct CorpusLoader {
    config: GardenConfig,
}

impl CorpusLoader {
    pub fn new(config: GardenConfig) -> Self {
        Self { config }
    }

    pub fn notes_dir(&self) -> &Path {
        &self.config.notes_dir
    }

    /// Load all notes, sorted by slug.
    ///
    /// Files that cannot be read or have no valid frontmatter are skipped
    /// with a warning.
    #[instrument(skip(self), fields(dir = %self.config.notes_dir.display()), name = "corpus_load")]
    pub async fn load(&self) -> Result<Vec<Note>> {
        self.config.validate_notes_dir()?;
        log::info!("Loading notes from {}", self.notes_dir().display());

        let files = self.scan_files();
        log::info!("Found {} note files", files.len());

        let mut notes = Vec::with_capacity(files.len());
        for path in files {
            let Some(slug) = self.slug_for(&path) else {
                log::warn!("Skipping file with unusable name: {}", path.display());
                continue;
            };

            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) => {
                    log::warn!("Failed to read {}: {}", path.display(), e);
                    continue;
                }
            };

            match parse_note(&slug, &content) {
                Ok(note) => {
                    log::debug!("Loaded {} as '{}'", path.display(), note.slug);
                    notes.push(note);
                }
                Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
            }
        }

        notes.sort_by(|a, b| a.slug.cmp(&b.slug));
        log::info!("Loaded {} notes", notes.len());
        Ok(notes)
    }

    /// Note files under the notes directory, in walk order.
    pub fn scan_files(&self) -> Vec<PathBuf> {
        let excluded = &self.config.excluded_paths;

        WalkDir::new(&self.config.notes_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| excluded.contains(name))
            })
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| self.is_note_file(path))
            .collect()
    }

    fn is_note_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.config
                    .allowed_extensions
                    .contains(&format!(".{}", ext.to_lowercase()))
            })
    }

    /// Slug for a note file: its path relative to the notes directory without
    /// extension, each segment normalized and joined with `/`.
    pub fn slug_for(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.config.notes_dir).ok()?;
        let without_ext = relative.with_extension("");

        let segments: Vec<String> = without_ext
            .components()
            .map(|component| match component {
                Component::Normal(part) => part.to_str().map(normalize),
                _ => None,
            })
            .collect::<Option<_>>()?;

        if segments.is_empty() || segments.iter().any(String::is_empty) {
            return None;
        }
        Some(segments.join("/"))
    }
}

/// Load all notes described by a configuration
pub async fn load_notes(config: &GardenConfig) -> Result<Vec<Note>> {
    CorpusLoader::new(config.clone()).load().await
}

/// Parse one in-memory note document under the given slug
pub fn load_notes_from_str(slug: &str, text: &str) -> Result<Note> {
    parse_note(slug, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn loader(dir: &Path) -> CorpusLoader {
        CorpusLoader::new(GardenConfig::builder(dir).build().unwrap())
    }

    #[test]
    fn test_slug_for_nested_path() {
        let loader = loader(Path::new("/garden"));
        assert_eq!(
            loader.slug_for(Path::new("/garden/Rust Ownership.md")).as_deref(),
            Some("rust-ownership")
        );
        assert_eq!(
            loader.slug_for(Path::new("/garden/Topics/Graph Theory.mdx")).as_deref(),
            Some("topics/graph-theory")
        );
        assert_eq!(loader.slug_for(Path::new("/elsewhere/a.md")), None);
    }

    #[tokio::test]
    async fn test_scan_filters_extensions_and_exclusions() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::fs::create_dir_all(root.join("drafts")).unwrap();
        std::fs::create_dir_all(root.join("sub")).unwrap();
        std::fs::write(root.join("a.md"), "").unwrap();
        std::fs::write(root.join("b.mdx"), "").unwrap();
        std::fs::write(root.join("c.txt"), "").unwrap();
        std::fs::write(root.join("drafts/d.md"), "").unwrap();
        std::fs::write(root.join("sub/e.md"), "").unwrap();

        let loader = loader(root);
        let slugs: Vec<String> = loader
            .scan_files()
            .iter()
            .filter_map(|p| loader.slug_for(p))
            .collect();
        assert_eq!(slugs, vec!["a", "b", "sub/e"]);
    }

    #[tokio::test]
    async fn test_load_missing_dir_is_config_error() {
        let temp = TempDir::new().unwrap();
        let result = loader(&temp.path().join("nope")).load().await;
        assert!(matches!(result, Err(Error::ConfigError { .. })));
    }

    #[test]
    fn test_load_notes_from_str() {
        let note = load_notes_from_str(
            "inline",
            "---\ntitle: Inline\ngrowthStage: budding\n---\n[[x]]",
        )
        .unwrap();
        assert_eq!(note.slug, "inline");
        assert_eq!(note.body, "[[x]]");
    }
}
