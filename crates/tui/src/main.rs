mod app;
mod keymap;
mod probe;
mod renderer;

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use tunelane_core::{DesignTokens, Route, Session, StaticCatalog};

/// Browse a music catalog with the arrow keys, the way a TV remote would.
#[derive(Parser, Debug)]
#[command(name = "tunelane", version)]
struct Args {
    /// Design-token file (TOML). Missing keys fall back to defaults.
    #[arg(long, env = "TUNELANE_TOKENS")]
    tokens: Option<PathBuf>,

    /// Catalog fixture (JSON). The built-in demo catalog is used otherwise.
    #[arg(long, env = "TUNELANE_CATALOG")]
    catalog: Option<PathBuf>,

    /// Screen to start on.
    #[arg(long, value_enum, default_value = "home")]
    screen: StartScreen,

    /// Channel to open with `--screen channel`.
    #[arg(long, default_value = "ch-1")]
    channel: String,

    /// Write logs here. The terminal belongs to the UI, so nothing is
    /// logged without it.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter used when `TUNELANE_LOG` is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StartScreen {
    Home,
    Search,
    Channel,
}

fn init_tracing(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file =
        File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env("TUNELANE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow::anyhow!("installing log subscriber: {err}"))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args)?;

    let tokens = match &args.tokens {
        Some(path) => DesignTokens::load(path)?,
        None => DesignTokens::default(),
    };
    let catalog = match &args.catalog {
        Some(path) => StaticCatalog::load(path)?,
        None => StaticCatalog::demo(),
    };

    let mut session = Session::new(Box::new(catalog), tokens);
    match args.screen {
        StartScreen::Home => {}
        StartScreen::Search => session.navigate(Route::SearchBrowse { filter: None }),
        StartScreen::Channel => session.navigate(Route::ChannelInfo {
            channel: args.channel.as_str().into(),
        }),
    }
    tracing::info!(route = ?session.route(), "starting");

    app::run(&mut session)
}
