//! corpusd: HTTP access to a tagged classification corpus.

use anyhow::Result;
use clap::{Parser, Subcommand};
use corpusd::config::{Config, LogFormat, LoggingConfig, DEFAULT_CONFIG_FILE};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;

#[derive(Parser)]
#[command(name = "corpusd")]
#[command(about = "Query, retag and delete documents in a tagged classification corpus")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Listen address (e.g. 0.0.0.0:8888)
        #[arg(short, long)]
        listen: Option<String>,

        /// Data directory
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },

    /// Write a default configuration file
    Init {
        /// Output directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn init_logging(logging: &LoggingConfig, verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => logging.level.as_tracing_level(),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false);

    match logging.format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path } => {
            init_logging(&LoggingConfig::default(), cli.verbose)?;
            commands::init::init_config(path)
        }
        Commands::Serve { listen, data_dir } => {
            let mut config = Config::load_or_default(&cli.config)?;
            config.resolve_data_dir(&cli.config);
            if let Some(addr) = listen {
                config.http.listen_addr = addr;
            }
            if let Some(dir) = data_dir {
                config.storage.data_dir = dir;
            }
            config.validate()?;

            init_logging(&config.logging, cli.verbose)?;
            commands::serve::serve(config).await
        }
    }
}
