use std::path::PathBuf;

use clap::Parser;
use log::info;

use notedown::{App, Commands, Config, NotesRepository, Result};

/// Main CLI application arguments and command structure
#[derive(Parser)]
#[clap(version, about = "Plain-text note manager with timestamp identifiers")]
struct Cli {
    /// Path to the configuration file
    #[clap(short = 'c', long, value_parser)]
    config: Option<PathBuf>,

    /// Path to the notes directory (overrides the configuration file)
    #[clap(long, value_parser)]
    notes_dir: Option<PathBuf>,

    /// Verbose output mode
    #[clap(short, long)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

fn initialize_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(notes_dir) = cli.notes_dir {
        config.notes_dir = notes_dir;
    }

    info!("Using notes directory: {}", config.notes_dir.display());
    let repository = NotesRepository::open(&config.notes_dir)?;

    let app = App::new(repository, config);
    app.run(cli.command)
}
