use anyhow::{Context, Result};
use attune_source::{Config, Loader, RecordSource};

use crate::tui;

/// Load the catalog, then hand it to the interactive filter.
pub async fn run_browse(config: &Config) -> Result<()> {
    let source = RecordSource::parse(&config.source);
    println!("Loading songs from {} ...", source);

    let loader = Loader::new(config)?;
    let records = loader
        .load(&source)
        .await
        .with_context(|| format!("Failed to load records from {}", source))?;

    tui::run_tui(records)
}
