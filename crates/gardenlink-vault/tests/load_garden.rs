//! Loading a garden from disk and querying it

use gardenlink_core::{GardenConfig, GrowthStage};
use gardenlink_graph::LinkEngine;
use gardenlink_vault::{CorpusLoader, load_notes};
use tempfile::TempDir;
use tokio::fs;

async fn create_test_garden() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    fs::write(
        root.join("Zebra Note.md"),
        "---\ntitle: Zebra Note\ngrowthStage: seedling\n---\nLinks to [[Alpha]] and [[Nowhere]].\n",
    )
    .await
    .expect("Failed to write zebra");

    fs::write(
        root.join("alpha.md"),
        "---\ntitle: Alpha\ngrowthStage: evergreen\naliases: [First]\ntopics: [basics]\n---\nBack to [[zebra note|the zebra]].\n",
    )
    .await
    .expect("Failed to write alpha");

    fs::create_dir_all(root.join("topics"))
        .await
        .expect("Failed to create topics dir");
    fs::write(
        root.join("topics/Graphs.mdx"),
        "---\ntitle: Graphs\ngrowthStage: budding\ntopics: [basics, math]\n---\nSee [[first]].\n",
    )
    .await
    .expect("Failed to write graphs");

    // Skipped: no frontmatter, missing growthStage, wrong extension, excluded dir
    fs::write(root.join("broken.md"), "No frontmatter here")
        .await
        .expect("Failed to write broken");
    fs::write(root.join("partial.md"), "---\ntitle: Partial\n---\nbody")
        .await
        .expect("Failed to write partial");
    fs::write(root.join("notes.txt"), "---\ntitle: Txt\ngrowthStage: seedling\n---\n")
        .await
        .expect("Failed to write txt");
    fs::create_dir_all(root.join("drafts"))
        .await
        .expect("Failed to create drafts");
    fs::write(
        root.join("drafts/wip.md"),
        "---\ntitle: WIP\ngrowthStage: seedling\n---\n",
    )
    .await
    .expect("Failed to write draft");

    temp_dir
}

#[tokio::test]
async fn test_load_skips_bad_files_and_sorts_by_slug() {
    let garden = create_test_garden().await;
    let config = GardenConfig::builder(garden.path()).build().unwrap();

    let notes = load_notes(&config).await.unwrap();
    let slugs: Vec<&str> = notes.iter().map(|n| n.slug.as_str()).collect();
    assert_eq!(slugs, vec!["alpha", "topics/graphs", "zebra-note"]);
    assert_eq!(notes[0].growth_stage, GrowthStage::Evergreen);
    assert_eq!(notes[0].aliases, vec!["First"]);
}

#[tokio::test]
async fn test_loaded_garden_backlinks() {
    let garden = create_test_garden().await;
    let config = GardenConfig::builder(garden.path()).build().unwrap();
    let notes = CorpusLoader::new(config.clone()).load().await.unwrap();

    let mut engine = LinkEngine::new(config);
    let report = engine.load(notes);
    assert!(report.is_empty());

    let backlinks: Vec<String> = engine
        .backlinks("alpha")
        .unwrap()
        .into_iter()
        .map(|l| l.slug)
        .collect();
    assert_eq!(backlinks, vec!["topics/graphs", "zebra-note"]);

    assert_eq!(engine.outbound("zebra-note").unwrap().len(), 1);
    assert_eq!(engine.topics().unwrap(), vec!["basics", "math"]);
    assert_eq!(engine.broken_links().unwrap()[0].target, "Nowhere");
}

#[tokio::test]
async fn test_custom_exclusions() {
    let garden = create_test_garden().await;
    let config = GardenConfig::builder(garden.path())
        .exclude("topics")
        .build()
        .unwrap();

    let notes = load_notes(&config).await.unwrap();
    assert!(notes.iter().all(|n| !n.slug.starts_with("topics/")));
    assert_eq!(notes.len(), 2);
}
