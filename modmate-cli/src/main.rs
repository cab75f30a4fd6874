//! ModMate - interactive course planner
//!
//! Loads the current academic year's course listing, restores the saved
//! session and runs the command shell on stdin/stdout.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use modmate_core::{AcademicYear, CatalogIndex, ModmateConfig, NusModsClient};

mod commands;
mod context;
mod session;
mod shell;

use commands::CommandRegistry;
use context::AppContext;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "modmate",
    about = "Plan course timetables from the NUSMods catalog",
    version
)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[clap(long)]
    config: Option<PathBuf>,

    /// Set log level (overrides the config file; RUST_LOG wins over both)
    #[clap(long)]
    log_level: Option<LogLevel>,

    /// Academic year to treat as current, e.g. 2024-2025
    #[clap(long)]
    year: Option<AcademicYear>,

    /// Session file holding timetables and bookmarks
    #[clap(long)]
    session: Option<PathBuf>,

    /// Do not save the session on exit
    #[clap(long)]
    no_save: bool,
}

/// Initialize tracing
///
/// `RUST_LOG` takes precedence over `directive`. Logs go to stderr so they
/// never mix with shell output.
fn initialize_tracing(directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ModmateConfig::load(cli.config.as_deref())?;
    if let Some(year) = cli.year {
        config.academic_year = Some(year);
    }
    if let Some(session) = cli.session {
        config.session_file = Some(session);
    }
    if cli.no_save {
        config.autosave = false;
    }

    let directive = cli
        .log_level
        .as_ref()
        .map(|level| level.to_filter_directive().to_string())
        .unwrap_or_else(|| config.log_level.clone());
    initialize_tracing(&directive);

    let client = NusModsClient::new(&config.api_base_url, config.request_timeout_secs)
        .context("Failed to create NUSMods client")?;
    tracing::debug!("Using catalog at {}", client.base_url());

    let current_year = config.current_year();
    tracing::debug!("Current academic year: {}", current_year);

    let index = match CatalogIndex::bootstrap(&client, current_year) {
        Ok(index) => {
            tracing::info!("Catalog ready with {} courses", index.course_count());
            index
        }
        Err(e) => {
            tracing::warn!("Bootstrap failed: {}", e);
            eprintln!("Warning: {e}");
            eprintln!("Course lookups will fail until the catalog can be reached.");
            CatalogIndex::new()
        }
    };

    let session_path = config.session_path();
    let restored = session::restore_user(session_path.as_deref());

    let mut ctx = AppContext::new(Box::new(client), index, restored.user, current_year);
    let registry = CommandRegistry::with_defaults();
    tracing::debug!(
        "Registered commands: {}",
        registry.names().collect::<Vec<_>>().join(", ")
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    shell::run(&registry, &mut ctx, stdin.lock(), &mut stdout)?;

    if config.autosave && restored.can_save {
        if let Some(path) = session_path {
            session::save_user(&path, ctx.user())?;
        }
    }

    Ok(())
}
