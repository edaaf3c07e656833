use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::warn;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt};

use scrollkit_core::{AppConfig, HeaderMode};

mod commands;

use commands::run::RunOptions;

/// Log file of the TUI, next to the config file
const LOG_FILE: &str = "scrollkit.log";

#[derive(Parser)]
#[command(name = "scrollkit")]
#[command(author, version, about = "Virtualized scrolling list engine")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI demo
    Run {
        /// Number of generated rows
        #[arg(short, long, default_value_t = 10_000)]
        rows: usize,
        /// Split generated rows into this many sections (0 for a flat list)
        #[arg(short, long, default_value_t = 0)]
        sections: usize,
        /// Show rows from a JSON file instead of generating them
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Header behavior (overrides the config file)
        #[arg(long, value_enum)]
        header_mode: Option<HeaderModeArg>,
    },
    /// Print the row layout computed for a JSON row file
    Inspect {
        path: PathBuf,
        /// Compute lock positions for stacking headers
        #[arg(long)]
        stack_headers: bool,
    },
    /// Print the effective configuration
    Config {
        /// Print the config file location instead
        #[arg(long)]
        path: bool,
        /// Write the effective configuration to the config file if none exists
        #[arg(long, conflicts_with = "path")]
        init: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum HeaderModeArg {
    Default,
    Locking,
    Stacking,
}

impl From<HeaderModeArg> for HeaderMode {
    fn from(arg: HeaderModeArg) -> Self {
        match arg {
            HeaderModeArg::Default => HeaderMode::Default,
            HeaderModeArg::Locking => HeaderMode::Locking,
            HeaderModeArg::Stacking => HeaderMode::Stacking,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration before logging so the configured level applies
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // The TUI owns the terminal, so its logs go to a file
    let to_file = matches!(cli.command, None | Some(Commands::Run { .. }));
    init_logging(&config, to_file)?;

    if let Some(e) = config_error {
        warn!(path = %AppConfig::config_path().display(), "Using default config: {}", e);
    }

    match cli.command {
        None => commands::run::run(config, RunOptions::default()),
        Some(Commands::Run {
            rows,
            sections,
            file,
            header_mode,
        }) => commands::run::run(
            config,
            RunOptions {
                rows,
                sections,
                file,
                header_mode: header_mode.map(HeaderMode::from),
            },
        ),
        Some(Commands::Inspect {
            path,
            stack_headers,
        }) => commands::inspect::run(&config, &path, stack_headers),
        Some(Commands::Config { path, init }) => commands::config::run(&config, path, init),
    }
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    let (writer, ansi) = if to_file {
        let dir = AppConfig::config_path()
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&dir)?;
        // No ANSI colors in the log file
        (BoxMakeWriter::new(tracing_appender::rolling::never(dir, LOG_FILE)), false)
    } else {
        (BoxMakeWriter::new(std::io::stderr), true)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(ansi)
                .with_writer(writer),
        )
        .init();
    Ok(())
}
