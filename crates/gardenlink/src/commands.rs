//! Subcommand execution against a loaded engine

use crate::cli::Command;
use anyhow::Result;
use gardenlink_core::to_json_string;
use gardenlink_graph::LinkEngine;
use serde_json::{Value, json};

/// JSON produced by a subcommand plus whether it counts as a success
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    pub value: Value,
    pub success: bool,
}

impl CommandOutput {
    fn ok(value: Value) -> Self {
        Self {
            value,
            success: true,
        }
    }

    /// Render for stdout
    pub fn to_json(&self, compact: bool) -> Result<String> {
        Ok(if compact {
            serde_json::to_string(&self.value)?
        } else {
            to_json_string(&self.value, "command output")?
        })
    }
}

/// Run one subcommand
pub fn execute(engine: &LinkEngine, command: &Command) -> Result<CommandOutput> {
    let output = match command {
        Command::Backlinks { slug } => CommandOutput::ok(json!({
            "slug": slug,
            "backlinks": engine.backlinks(slug)?,
        })),

        Command::Outbound { slug } => CommandOutput::ok(json!({
            "slug": slug,
            "outboundLinks": engine.outbound(slug)?,
        })),

        Command::Traverse { slug, depth } => {
            CommandOutput::ok(serde_json::to_value(engine.traverse(slug, *depth)?)?)
        }

        Command::Render { slug } => CommandOutput::ok(json!({
            "slug": slug,
            "html": engine.render(slug)?,
        })),

        Command::Resolve { target } => CommandOutput::ok(json!({
            "target": target,
            "resolved": engine.resolve(target)?,
        })),

        Command::Graph => {
            let graph = engine.graph()?;
            CommandOutput::ok(json!({
                "generatedAt": chrono::Utc::now().to_rfc3339(),
                "stats": graph.stats(),
                "notes": graph,
            }))
        }

        Command::Check { strict } => {
            let report = engine.check()?;
            let success = !*strict || report.is_healthy();
            if !report.is_healthy() {
                log::warn!(
                    "{} warnings, {} errors",
                    report.integrity.summary.warning_count,
                    report.integrity.summary.error_count
                );
            }
            CommandOutput {
                value: serde_json::to_value(&report)?,
                success,
            }
        }

        Command::Topics => CommandOutput::ok(json!({ "topics": engine.topics()? })),
    };

    Ok(output)
}
