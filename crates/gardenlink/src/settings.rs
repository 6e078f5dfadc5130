//! Configuration layering.
//!
//! Later layers win: profile defaults, then an optional YAML file, then
//! `GARDENLINK_*` environment variables, then command-line flags.

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use gardenlink_core::{ConfigProfile, GardenConfig};
use std::path::{Path, PathBuf};

/// Prefix of environment variables read into the configuration
pub const ENV_PREFIX: &str = "GARDENLINK";

/// Command-line values that take precedence over every other layer
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub notes_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub sequential: bool,
}

/// Assemble and validate the effective configuration
pub fn load_settings(
    profile: ConfigProfile,
    file: Option<&Path>,
    overrides: &Overrides,
) -> Result<GardenConfig> {
    let defaults = profile.create_config();

    let mut builder = Config::builder().add_source(
        Config::try_from(&defaults).context("Failed to encode profile defaults")?,
    );

    if let Some(path) = file {
        builder = builder.add_source(File::from(path).format(FileFormat::Yaml).required(true));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("allowed_extensions")
            .with_list_parse_key("excluded_paths"),
    );

    let mut config: GardenConfig = builder
        .build()
        .context("Failed to assemble configuration")?
        .try_deserialize()
        .context("Invalid configuration")?;

    if let Some(dir) = &overrides.notes_dir {
        config.notes_dir = dir.clone();
    }
    if let Some(level) = &overrides.log_level {
        config.log_level = level.clone();
    }
    if overrides.sequential {
        config.parallel_graph = false;
    }

    config.validate()?;
    Ok(config)
}
