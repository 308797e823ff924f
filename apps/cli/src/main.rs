//! iconforge CLI: compile SVG icon files into Rust constants.
//!
//! Discovers SVG assets, filters them per target with glob patterns, and
//! writes generated Rust modules plus optional JSON manifests.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
