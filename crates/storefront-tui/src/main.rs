//! `storefront-tui` — terminal storefront browser.
//!
//! Built on [ratatui](https://ratatui.rs) over `storefront-core`: a home
//! screen listing categories and a search screen with infinite scroll,
//! refresh and a category/sort filter. Screens are reachable via number
//! keys (1-2) or Tab.
//!
//! Logs are written to a file (default `/tmp/storefront-tui.log`) to avoid
//! corrupting the terminal UI.

mod action;
mod app;
mod component;
mod data_bridge;
mod screen;
mod screens;
mod terminal;
mod theme;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use storefront_core::{RemoteCatalog, StoreConfig, TlsVerification};

use crate::app::App;

/// Browse and search a storefront catalog in the terminal.
#[derive(Parser, Debug)]
#[command(name = "storefront-tui", version, about)]
struct Cli {
    /// Storefront API URL (e.g., https://shop.example.com/api)
    #[arg(short = 'u', long, env = "STOREFRONT_API_URL")]
    api_url: Option<String>,

    /// Config profile to use when no URL is given
    #[arg(short = 'p', long, env = "STOREFRONT_PROFILE")]
    profile: Option<String>,

    /// Open straight into search, filtered to this category
    #[arg(short = 'c', long)]
    category: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Log file path (defaults to /tmp/storefront-tui.log)
    #[arg(long, default_value = "/tmp/storefront-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Nothing may log to stdout/stderr while the
/// terminal is in raw mode. The returned guard flushes logs on drop.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "storefront_tui={log_level},storefront_core={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("storefront-tui.log"));

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

/// Resolve the service config: `--api-url` wins, then the config profile.
fn build_store_config(cli: &Cli) -> Result<StoreConfig> {
    let mut config = if let Some(ref raw) = cli.api_url {
        StoreConfig::new(storefront_config::parse_api_url(raw)?)
    } else {
        let cfg = storefront_config::load_config()?;
        let name = cfg.profile_name(cli.profile.as_deref());
        let profile = cfg.profile(name).map_err(|_| {
            eyre!("no API URL given and no profile '{name}' configured; pass --api-url or run `storefront config init`")
        })?;
        storefront_config::profile_to_store_config(profile, name, &cfg.defaults)?
    };

    if cli.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks go in before the terminal is touched so init panics print cleanly
    terminal::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let config = build_store_config(&cli)?;
    let host = config.url.host_str().unwrap_or("storefront").to_owned();
    info!(url = %config.url, category = ?cli.category, "starting storefront-tui");

    let catalog = RemoteCatalog::from_config(&config)?;
    let mut app = App::new(catalog, host, cli.category);
    app.run().await?;

    Ok(())
}
