//! `hearth-tui` — Real-time terminal dashboard for a hearth hub.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive data from
//! `hearth-core`'s [`EntityStream`](hearth_core::EntityStream). Screens
//! are navigable via number keys (1-4): Map, Devices, Events, Add Device.
//!
//! Logs are written to a file (default `/tmp/hearth-tui.log`) to avoid
//! corrupting the terminal UI. A background data bridge task continuously
//! streams entity updates from the hub into the TUI action loop.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app
//! launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod drag;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use hearth_core::{Hub, HubConfig};

use crate::app::App;

/// Terminal dashboard for monitoring and controlling a hearth hub.
#[derive(Parser, Debug)]
#[command(name = "hearth-tui", version, about)]
struct Cli {
    /// Hub URL (e.g., http://192.168.1.50)
    #[arg(short = 'H', long, env = "HEARTH_HUB")]
    hub: Option<String>,

    /// Profile name from the shared config file
    #[arg(short = 'p', long, env = "HEARTH_PROFILE")]
    profile: Option<String>,

    /// Log file path (defaults to /tmp/hearth-tui.log)
    #[arg(long, default_value = "/tmp/hearth-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that
/// would corrupt the TUI output. Returns a guard that must be held for
/// the lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hearth_tui={log_level}")));

    let log_dir = cli.log_file.parent().unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("hearth-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Build a [`Hub`] from CLI args, if a URL was provided.
fn build_hub(cli: &Cli) -> Option<Hub> {
    let url_str = cli.hub.as_deref()?;
    let url = url_str.parse().ok()?;
    Some(Hub::new(HubConfig::new(url)))
}

/// Try loading a hub from the shared config file.
fn build_hub_from_config(cli: &Cli) -> Option<Hub> {
    let cfg = hearth_config::load_config().ok()?;
    let profile_name = cli
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into());
    let profile = cfg.profiles.get(&profile_name)?;
    let hub_config = hearth_config::profile_to_hub_config(profile).ok()?;
    Some(Hub::new(hub_config))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    info!(
        hub = cli.hub.as_deref().unwrap_or("(not set)"),
        "starting hearth-tui"
    );

    // Priority: CLI flags > config file
    let hub = build_hub(&cli).or_else(|| build_hub_from_config(&cli));
    let mut app = App::new(hub);
    app.run().await?;

    Ok(())
}
