mod config;
mod display;
mod i18n;
mod token_tab;
mod tui;
#[cfg(feature = "tracing")]
mod tui_log_layer;

use {
    anyhow::{Context, Result},
    clap::{Parser, Subcommand},
    config::{AppConfig, Overrides},
    display::TokenSetListFormatter,
    i18n::Locale,
    std::{
        collections::VecDeque,
        path::PathBuf,
        sync::{Arc, Mutex},
    },
    token_tab::{
        AppState, LogBuffer, TabKey,
        fetch::{TabData, load_tab},
        logging::{log_error, log_info, log_warn},
    },
    tokensets_api::{
        FileCache, HistoricalClient, TokenSetsApi, TokenSetsClient, TokenSetsSource,
        default_cache_dir,
    },
    tokio::sync::Mutex as TokioMutex,
};

#[derive(Debug, Parser)]
#[command(
    name = "tokensets-tui",
    version,
    about = "Browse TokenSets portfolios and rebalancing sets with historical price changes"
)]
struct Cli {
    /// Tab to open: "portfolios" or "rebalancing_sets"
    #[arg(long, global = true)]
    tab: Option<String>,

    #[arg(long, value_enum, global = true)]
    locale: Option<Locale>,

    /// Terminal width at which the full table replaces cards
    #[arg(long, global = true)]
    breakpoint: Option<u16>,

    /// Base URL of the TokenSets API
    #[arg(long, global = true)]
    tokensets_api: Option<String>,

    /// Base URL of the historical market-data API
    #[arg(long, global = true)]
    historical_api: Option<String>,

    /// Do not read or write the historical data cache
    #[arg(long, global = true)]
    no_cache: bool,

    /// Config file (defaults to ~/.config/tokensets-tui/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive terminal UI (default)
    Tui {
        /// Show the log panel on startup
        #[arg(long)]
        logs: bool,
    },
    /// Fetch one tab and print it as a table
    List,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            tab: self.tab.clone(),
            locale: self.locale,
            breakpoint: self.breakpoint,
            tokensets_api: self.tokensets_api.clone(),
            historical_api: self.historical_api.clone(),
            no_cache: self.no_cache,
            show_logs: matches!(self.command, Some(Command::Tui { logs: true })),
        }
    }
}

fn build_source(config: &AppConfig) -> TokenSetsApi {
    let sets = TokenSetsClient::with_base_url(&config.tokensets_api_base);
    let mut historical = HistoricalClient::with_base_url(&config.historical_api_base);

    if config.cache_ttl_seconds > 0 {
        match FileCache::new(default_cache_dir()) {
            Ok(cache) => historical.set_cache(cache.with_ttl(config.cache_ttl_seconds)),
            Err(_e) => log_warn!("Historical cache disabled: {}", _e),
        }
    }

    TokenSetsApi::new(sets, historical)
}

#[cfg(feature = "tracing")]
fn init_tui_tracing(logs: &LogBuffer) {
    use tracing_subscriber::prelude::*;

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tui_log_layer::TuiLogLayer::new(Arc::clone(logs)))
        .try_init();
}

#[cfg(not(feature = "tracing"))]
fn init_tui_tracing(_logs: &LogBuffer) {}

#[cfg(feature = "tracing")]
fn init_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .try_init();
}

#[cfg(not(feature = "tracing"))]
fn init_stderr_tracing() {}

async fn run_tui(config: AppConfig, source: Arc<dyn TokenSetsSource>, logs: LogBuffer) -> Result<()> {
    let mut app = AppState::new(
        config.default_tab_key(),
        config.locale,
        config.breakpoint,
        logs,
    );
    app.show_logs = config.show_logs;
    let app_state = Arc::new(TokioMutex::new(app));

    let terminal = match tui::setup_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = tui::restore_terminal();
            return Err(e);
        },
    };
    let result = token_tab::run_token_sets_tui(terminal, app_state, source).await;
    tui::restore_terminal()?;
    result
}

/// One fetch cycle printed to stdout. A failed fetch prints an empty table.
async fn run_list(config: AppConfig, source: Arc<dyn TokenSetsSource>) -> Result<()> {
    let key: TabKey = config.default_tab_key();
    log_info!("Listing {}", key.as_str());

    let data = match load_tab(source.as_ref(), key).await {
        Ok(data) => data,
        Err(_e) => {
            log_error!("Failed to fetch {}: {}", key.as_str(), _e);
            TabData {
                sets: Vec::new(),
                historical: Vec::new(),
            }
        },
    };

    print!(
        "{}",
        TokenSetListFormatter::format_table(key, &data, config.locale)
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .context("Failed to load configuration")?;
    let config = file_config.apply(cli.overrides());

    let logs: LogBuffer = Arc::new(Mutex::new(VecDeque::new()));
    match cli.command {
        Some(Command::List) => init_stderr_tracing(),
        Some(Command::Tui { .. }) | None => init_tui_tracing(&logs),
    }

    let source: Arc<dyn TokenSetsSource> = Arc::new(build_source(&config));

    match cli.command {
        Some(Command::List) => run_list(config, source).await,
        Some(Command::Tui { .. }) | None => run_tui(config, source, logs).await,
    }
}
