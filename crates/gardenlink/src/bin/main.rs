//! Gardenlink CLI

use clap::Parser;
use gardenlink::Cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    gardenlink::run(cli).await
}
