use anyhow::Result;
use chatlist::{config::Config, logger, logger::Logger, ui};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chatlist")]
#[command(about = "A terminal conversation list with context menus")]
#[command(version)]
struct Cli {
    /// Use this configuration file instead of the default locations
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write a default configuration file and exit (defaults to the user config directory)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    generate_config: Option<Option<PathBuf>>,

    /// Disable mouse capture
    #[arg(long)]
    no_mouse: bool,

    /// Write logs to the log file regardless of the configuration
    #[arg(long)]
    log: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.generate_config {
        let path = match path {
            Some(path) => path,
            None => Config::get_default_config_path()?,
        };
        return Config::generate_default_config(path);
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    if cli.no_mouse {
        config.ui.mouse_enabled = false;
    }
    if cli.log {
        config.logging.enabled = true;
    }

    let memory_logger = Logger::new(config.logging.max_entries);
    logger::init(&config.logging, &memory_logger)?;
    log::info!("chatlist {} starting", env!("CARGO_PKG_VERSION"));

    // Run the TUI application
    ui::run_app(config, memory_logger).await
}
