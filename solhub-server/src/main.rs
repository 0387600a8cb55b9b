//! Solhub server binary
//!
//! Wires configuration, the SQLite-backed registry and the REST API into a
//! single process.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use solhub_config::{ConfigLoader, LogFormat, SolhubConfig};
use solhub_rest_api::{create_rest_app, AppConfig, AppContext};
use solhub_web::middleware::CorsConfig;
use solhub_storage::SeaOrmRepositoryFactory;

#[derive(Parser)]
#[command(author, version, about = "Solhub registry and configuration server", long_about = None)]
struct Cli {
    /// Configuration file path (YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Server bind address, overrides the config file
    #[arg(short, long)]
    bind: Option<String>,

    /// Server port, overrides the config file
    #[arg(short, long)]
    port: Option<u16>,

    /// Database URL, overrides the config file
    #[arg(long)]
    database_url: Option<String>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::new()
        .load(cli.config.as_ref())
        .context("failed to load configuration")?;
    apply_cli_overrides(&mut config, &cli);

    if cli.print_config {
        println!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    init_tracing(&config);

    let db_config = solhub_storage::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        connection_timeout: std::time::Duration::from_secs(config.database.connection_timeout_secs),
    };
    let connection = solhub_storage::connect(&db_config)
        .await
        .context("failed to connect to database")?;

    let factory = Arc::new(SeaOrmRepositoryFactory::new(connection));
    let context = AppContext::new(factory);
    let app_config = AppConfig {
        cors: CorsConfig {
            allowed_origins: config.server.cors_origins.clone(),
            ..Default::default()
        },
        ..Default::default()
    };
    let app = create_rest_app(context, app_config);

    let listen_address = config.server.listen_address();
    let listener = tokio::net::TcpListener::bind(&listen_address)
        .await
        .with_context(|| format!("failed to bind {}", listen_address))?;

    info!("Solhub server listening on {}", listen_address);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// CLI flags take precedence over file and environment values
fn apply_cli_overrides(config: &mut SolhubConfig, cli: &Cli) {
    if let Some(bind) = &cli.bind {
        config.server.bind_address = bind.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(url) = &cli.database_url {
        config.database.url = url.clone();
    }
}

fn init_tracing(config: &SolhubConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "solhub={level},tower_http={level}",
            level = config.logging.level.as_filter_str()
        ))
    });

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Text => builder.init(),
    }
}
