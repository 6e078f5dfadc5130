//! Command-line interface definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gardenlink - wiki-link and backlink queries for a digital garden
#[derive(Parser, Debug)]
#[command(name = "gardenlink", author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the note files
    #[arg(short, long, env = "GARDENLINK_NOTES_DIR", global = true)]
    pub notes_dir: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Configuration profile (development, production, minimal)
    #[arg(short, long, default_value = "production", global = true)]
    pub profile: String,

    /// Log level filter, overriding the configured one (RUST_LOG wins over both)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, action = clap::ArgAction::SetTrue, global = true)]
    pub log_json: bool,

    /// Print single-line JSON instead of pretty output
    #[arg(long, action = clap::ArgAction::SetTrue, global = true)]
    pub compact: bool,

    /// Derive the graph on a single thread
    #[arg(long, action = clap::ArgAction::SetTrue, global = true)]
    pub sequential: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Notes linking to a note
    Backlinks { slug: String },

    /// Notes a note links to
    Outbound { slug: String },

    /// Follow outbound links for several hops, reporting cycles
    Traverse {
        slug: String,

        /// Maximum number of hops (defaults to the configured depth)
        #[arg(short, long)]
        depth: Option<usize>,
    },

    /// Render a note body to HTML with wiki-links rewritten
    Render { slug: String },

    /// Resolve a raw wiki-link target
    Resolve { target: String },

    /// The whole link graph
    Graph,

    /// Integrity issues, broken links and cycles
    Check {
        /// Exit with a failure status when warnings or errors are found
        #[arg(long, action = clap::ArgAction::SetTrue)]
        strict: bool,
    },

    /// Every distinct topic
    Topics,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_traverse_with_globals() {
        let cli = Cli::try_parse_from([
            "gardenlink",
            "traverse",
            "rust",
            "--depth",
            "3",
            "--notes-dir",
            "garden",
            "--compact",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::Traverse {
                slug: "rust".to_string(),
                depth: Some(3)
            }
        );
        assert_eq!(cli.notes_dir, Some(PathBuf::from("garden")));
        assert!(cli.compact);
        assert_eq!(cli.profile, "production");
    }

    #[test]
    fn test_parse_check_strict() {
        let cli = Cli::try_parse_from(["gardenlink", "check", "--strict"]).unwrap();
        assert_eq!(cli.command, Command::Check { strict: true });
    }
}
