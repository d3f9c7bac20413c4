//! CiviCode CLI — municipal code crawler.
//!
//! Walks a Chapters → Articles → Sections code website and writes the whole
//! hierarchy to one JSON document for offline browsing.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
