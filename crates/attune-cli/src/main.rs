use anyhow::Result;
use attune_source::{Config, LoggingConfig};
use clap::Parser;

mod commands;
mod logging;
mod tui;

use commands::filter::FilterArgs;

#[derive(Debug, Parser)]
#[command(name = "attune", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog location: an http(s) URL serving TSV, or a local file
    #[arg(long, global = true)]
    source: Option<String>,

    /// Log more (repeat for debug and trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Print the songs matching a set of targets
    ///
    /// Loads the catalog once and keeps every song whose audio features all
    /// lie within tolerance of the targets:
    ///
    /// - tempo within --tempo-tolerance BPM (default 5) of --tempo
    /// - danceability, energy, valence, acousticness and instrumentalness
    ///   each within --tolerance of their target
    ///
    /// Comparisons are inclusive. Rows missing any of the six features, or
    /// carrying a non-numeric value for one, never match. Output keeps
    /// catalog order.
    Filter(FilterArgs),
    /// Tune targets interactively and watch the matches update
    Browse,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Create the config file with defaults
    Init,
    /// Print an example config file
    Example,
    /// Print one value, or the whole file when no key is given
    Get { key: Option<String> },
    /// Set a value in the config file
    Set { key: String, value: String },
}

/// Load configuration and install the logger it describes.
fn setup(source: Option<String>, verbose: u8, quiet: bool) -> Result<Config> {
    let config = Config::load_with_source(source)?;
    logging::init(&config.logging, verbose, quiet)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Filter(args) => {
            let config = setup(cli.source, cli.verbose, cli.quiet)?;
            commands::run_filter(&config, &args).await?;
        }
        Commands::Browse => {
            let config = setup(cli.source, cli.verbose, cli.quiet)?;
            commands::run_browse(&config).await?;
        }
        Commands::Config { action } => {
            logging::init(&LoggingConfig::default(), cli.verbose, cli.quiet)?;
            match action {
                ConfigAction::Show => commands::config::show_config()?,
                ConfigAction::Path => commands::config::show_path()?,
                ConfigAction::Init => commands::config::init_config()?,
                ConfigAction::Example => commands::config::show_example()?,
                ConfigAction::Get { key } => commands::config::get_config(key)?,
                ConfigAction::Set { key, value } => commands::config::set_config(&key, &value)?,
            }
        }
    }

    Ok(())
}
