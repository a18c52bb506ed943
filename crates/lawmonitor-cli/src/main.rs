mod display;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lawmonitor_engine::{Monitor, SweepConfig};
use lawmonitor_registry::RegistryClient;
use lawmonitor_server::AppState;
use lawmonitor_store::{DuckStore, MemoryStore, Store};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt as log_fmt};

#[derive(Parser)]
#[command(name = "lawmonitor", version, about = "Track Korean statutes for amendments")]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Config {
    /// Registry access key (sent as `OC`).
    #[arg(long, env = "LAW_API_KEY", default_value = "lawmonitor2025", hide_env_values = true, global = true)]
    api_key: String,

    #[arg(long, env = "LAW_API_BASE_URL", default_value = "https://www.law.go.kr/DRF", global = true)]
    api_base_url: String,

    /// DuckDB file. Without it everything lives in memory.
    #[arg(long, env = "LAWMONITOR_DB", global = true)]
    db: Option<PathBuf>,

    #[arg(long, env = "GATEWAY_TIMEOUT_SECS", default_value_t = 10, global = true)]
    gateway_timeout_secs: u64,

    #[arg(long, env = "SWEEP_CONCURRENCY", default_value_t = 4, global = true)]
    sweep_concurrency: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("db", &self.db)
            .field("gateway_timeout_secs", &self.gateway_timeout_secs)
            .field("sweep_concurrency", &self.sweep_concurrency)
            .finish()
    }
}

#[derive(Subcommand)]
enum Command {
    /// Serve the JSON API, the registry relay, and the dashboard assets.
    Serve {
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,

        #[arg(long, env = "STATIC_DIR", default_value = ".")]
        static_dir: PathBuf,
    },
    /// Check every active law against the registry once.
    Sweep,
    /// Print the dashboard counts and recent activity.
    Dashboard,
    /// Search the registry by law name.
    Search { query: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,lawmonitor=debug")),
        )
        .with(log_fmt::layer())
        .init();

    let cli = Cli::parse();
    info!(version = env!("CARGO_PKG_VERSION"), config = ?cli.config, "lawmonitor starting");

    let config = &cli.config;
    let timeout = Duration::from_secs(config.gateway_timeout_secs);
    let store = open_store(config)?;
    let registry = Arc::new(
        RegistryClient::new(&config.api_base_url, &config.api_key, timeout)
            .context("building registry client")?,
    );
    let monitor = Monitor::new(store, registry.clone()).with_config(SweepConfig {
        concurrency: config.sweep_concurrency.max(1),
        gateway_timeout: timeout,
    });

    match cli.command {
        Command::Serve { port, static_dir } => {
            let app = lawmonitor_server::app(AppState::new(monitor, registry), &static_dir);
            let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
                .await
                .with_context(|| format!("binding port {port}"))?;
            info!(port, static_dir = %static_dir.display(), "listening");
            axum::serve(listener, app).await.context("server error")?;
        }
        Command::Sweep => {
            let report = monitor.run_sweep().await?;
            display::print_report(&report);
        }
        Command::Dashboard => {
            let snapshot = monitor.dashboard().await?;
            display::print_dashboard(&snapshot);
        }
        Command::Search { query } => {
            let laws = monitor.search_registry(&query).await?;
            display::print_search_results(&query, &laws);
        }
    }
    Ok(())
}

fn open_store(config: &Config) -> Result<Arc<dyn Store>> {
    match &config.db {
        Some(path) => {
            let store = DuckStore::open_persistent(path)
                .with_context(|| format!("opening {}", path.display()))?;
            Ok(Arc::new(store))
        }
        None => {
            info!("no database configured, using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
