//! Campus settings CLI entry point.
//!
//! Opens the process-wide [`SettingsStore`] over the on-disk storage, applies
//! one command and prints the resulting preferences as JSON.
//!
//! # Usage
//!
//! ```text
//! campus-settings [OPTIONS] <COMMAND>
//!
//! Commands:
//!   show                         Print the current preferences
//!   toggle-dark-mode             Flip the dark theme
//!   set-dark-mode <BOOL>         Set the dark theme
//!   toggle-notifications         Flip the notification opt-in
//!   set-notifications <BOOL>     Set the notification opt-in
//!   set-language <fr|en>         Set the UI locale
//!   reset                        Restore the defaults
//!
//! Options:
//!   --dir    <DIR>   Storage directory  [env: CAMPUS_SETTINGS_DIR]
//!   --config <FILE>  Config file        [env: CAMPUS_CONFIG]
//! ```
//!
//! The log level comes from `RUST_LOG`, falling back to `log_level` in the
//! config file.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use campus_settings::infrastructure::config::{self, AppConfig};
use campus_settings::{FileStorage, SettingsStore};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Reads and changes the Campus user preferences.
#[derive(Debug, Parser)]
#[command(
    name = "campus-settings",
    about = "Read and change the Campus client's user preferences",
    version
)]
struct Cli {
    /// Directory holding the persisted records.
    ///
    /// Overrides `storage_dir` from the config file.
    #[arg(long, global = true, env = "CAMPUS_SETTINGS_DIR")]
    dir: Option<PathBuf>,

    /// Path of the TOML config file.  Defaults to the platform config dir.
    #[arg(long, global = true, env = "CAMPUS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the current preferences.
    Show,
    /// Flip the dark theme.
    ToggleDarkMode,
    /// Set the dark theme.
    SetDarkMode {
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
    /// Flip the notification opt-in.
    ToggleNotifications,
    /// Set the notification opt-in.
    SetNotifications {
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
    /// Set the UI locale (`fr` or `en`).
    SetLanguage { code: String },
    /// Restore every preference to its default.
    Reset,
}

fn load_app_config(cli: &Cli) -> Result<AppConfig, config::ConfigError> {
    match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (app_config, config_error) = match load_app_config(&cli) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&app_config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = config_error {
        warn!(error = %e, "ignoring config file; using defaults");
    }

    let storage_dir = match cli.dir.clone() {
        Some(dir) => dir,
        None => app_config
            .resolve_storage_dir()
            .context("no storage directory configured; pass --dir")?,
    };
    info!(dir = %storage_dir.display(), "opening settings store");

    // The one store instance of this process.
    let store = SettingsStore::open(FileStorage::new(storage_dir));

    match cli.command {
        Command::Show => {}
        Command::ToggleDarkMode => store.toggle_dark_mode(),
        Command::SetDarkMode { value } => store.set_dark_mode(value),
        Command::ToggleNotifications => store.toggle_notifications(),
        Command::SetNotifications { value } => store.set_notifications_enabled(value),
        Command::SetLanguage { code } => store
            .set_language_code(&code)
            .with_context(|| format!("cannot set language to {code:?}"))?,
        Command::Reset => store.reset(),
    }

    if store.last_persist_failed() {
        warn!("preferences applied for this run only; they could not be saved");
    }

    let json = serde_json::to_string_pretty(&store.state()).context("encoding preferences")?;
    println!("{json}");
    Ok(())
}
