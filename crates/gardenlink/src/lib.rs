//! # Gardenlink CLI
//!
//! Loads a digital garden from disk and answers wiki-link queries as JSON.
//!
//! Configuration is layered (profile, YAML file, `GARDENLINK_*` environment,
//! flags), logs go to stderr, and command output goes to stdout.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod settings;

use anyhow::{Context, Result};
use std::process::ExitCode;

pub use cli::{Cli, Command};
pub use commands::{CommandOutput, execute};
pub use settings::{Overrides, load_settings};

use gardenlink_core::ConfigProfile;
use gardenlink_graph::LinkEngine;
use gardenlink_vault::CorpusLoader;

/// Load configuration and corpus, run the command, print its output
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let profile: ConfigProfile = cli.profile.parse()?;
    let overrides = Overrides {
        notes_dir: cli.notes_dir.clone(),
        log_level: cli.log_level.clone(),
        sequential: cli.sequential,
    };
    let config = load_settings(profile, cli.config.as_deref(), &overrides)?;

    logging::init_logging(&config.log_level, cli.log_json)?;
    tracing::info!(
        "Gardenlink v{} ({} profile: {})",
        env!("CARGO_PKG_VERSION"),
        profile.name(),
        profile.description()
    );

    let notes = CorpusLoader::new(config.clone())
        .load()
        .await
        .with_context(|| format!("Failed to load notes from {}", config.notes_dir.display()))?;

    let mut engine = LinkEngine::new(config);
    let report = engine.load(notes);
    if !report.is_clean() {
        tracing::warn!(
            "Corpus has {} integrity warnings and {} errors",
            report.summary.warning_count,
            report.summary.error_count
        );
    }

    let output = execute(&engine, &cli.command)?;
    println!("{}", output.to_json(cli.compact)?);

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
