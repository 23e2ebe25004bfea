//! Gamebook server binary.
//!
//! Reads configuration from flags or environment, opens the record store and
//! serves the game API until Ctrl-C.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use gamebook_server::{
    GameRecordService, NetworkConfig, NetworkModule, RecordStoreFactory, StorageBackend,
    StorageConfig,
};

#[derive(Parser)]
#[command(name = "gamebook-server")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, env = "GAMEBOOK_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to bind; 0 lets the OS choose
    #[arg(long, env = "GAMEBOOK_PORT", default_value_t = 8080)]
    port: u16,

    /// Allowed CORS origin, repeatable. Defaults to any origin.
    #[arg(long = "cors-origin")]
    cors_origins: Vec<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    request_timeout_secs: u64,

    /// Record store backend
    #[arg(long, value_enum, default_value_t = StorageKind::Memory)]
    storage: StorageKind,

    /// Database file for the redb backend
    #[arg(long, env = "GAMEBOOK_DB_PATH", default_value = "./gamebook.redb")]
    db_path: PathBuf,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StorageKind {
    Memory,
    Redb,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

impl Cli {
    fn network_config(&self) -> NetworkConfig {
        let mut config = NetworkConfig {
            host: self.host.clone(),
            port: self.port,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..NetworkConfig::default()
        };
        if !self.cors_origins.is_empty() {
            config.cors_origins.clone_from(&self.cors_origins);
        }
        config
    }

    fn storage_config(&self) -> StorageConfig {
        let backend = match self.storage {
            StorageKind::Memory => StorageBackend::Memory,
            StorageKind::Redb => StorageBackend::Redb {
                path: self.db_path.clone(),
            },
        };
        StorageConfig { backend }
    }
}

fn init_tracing(level: &str, format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format);

    let store = RecordStoreFactory::new(cli.storage_config()).create()?;
    let games = GameRecordService::new(store);

    let mut network = NetworkModule::new(cli.network_config(), games);
    let port = network.start().await?;
    info!(port, "gamebook server listening");

    network
        .serve(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %err, "failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    info!("gamebook server stopped");
    Ok(())
}
