use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use cvcheck_client::HttpAnalysisClient;
use cvcheck_core::preferences::{FileStore, PreferenceState, prefers_dark};
use cvcheck_ui::{UiOptions, UiOutcome};
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod cli;
mod context;
mod controller;
mod events;
mod profile;
mod state;
mod ui;

#[cfg(test)]
mod tests;

use self::cli::Cli;
use self::controller::AppController;
use self::state::AppState;

/// 128 + SIGINT, as shells report it
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok(); // .env is optional

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match run(cli).await {
        Ok(UiOutcome::Completed) => ExitCode::SUCCESS,
        Ok(UiOutcome::Failed(message)) => {
            tracing::info!("Session ended with an error: {message}");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout stays clean for `--print`. JSON when asked
/// for or when stderr is not a terminal.
fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let json = log_json || !atty::is(atty::Stream::Stderr);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {e}");
    }
}

async fn run(cli: Cli) -> anyhow::Result<UiOutcome> {
    let mut config = profile::load_user_config().context("Failed to load config")?;
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    let interactive = config.ui.interactive && !cli.no_input && atty::is(atty::Stream::Stdin);
    let color = config.ui.color && std::env::var_os("NO_COLOR").is_none();

    let store_path = profile::store_path(&config);
    let store = FileStore::open(store_path.clone())
        .with_context(|| format!("Failed to open preference store {}", store_path.display()))?;
    let system_dark = prefers_dark(std::env::var("COLORFGBG").ok().as_deref());
    let preferences = PreferenceState::load(Box::new(store), system_dark, config.ui.fallback_theme);

    let api = HttpAnalysisClient::new(config.api.base_url.clone(), config.request_timeout())
        .context("Failed to build HTTP client")?;
    tracing::info!("Analysis service: {}", api.base_url());

    let options = UiOptions {
        script: cli.script(),
        prefs: preferences.current(),
        interactive,
        color,
    };

    let state = Arc::new(AppState::new(config, preferences));
    let controller = AppController::new(state, Arc::new(api));

    tokio::select! {
        outcome = controller.run(options) => outcome,
        _ = signal::ctrl_c() => {
            tracing::info!("Interrupted");
            // A prompt may still hold stdin on a blocking thread
            std::process::exit(EXIT_INTERRUPTED);
        }
    }
}
