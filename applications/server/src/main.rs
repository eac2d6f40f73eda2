/// userdb Server - user CRUD over a JSON file
use clap::{Parser, Subcommand};
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use userdb_core::{JsonFileStore, UserRepository};
use userdb_server::{api, config::ServerConfig, shutdown, state::AppState};

#[derive(Parser)]
#[command(name = "userdb-server")]
#[command(about = "REST service for users stored in a JSON file", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "USERDB_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// List all users in the store
    ListUsers,
    /// Create an empty store file at the configured path
    InitStore,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "userdb_server=info,userdb_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::ListUsers => list_users(&config)?,
        Commands::InitStore => init_store(&config)?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting userdb server");
    tracing::info!("Store: {}", config.storage.path.display());

    let store = open_store(&config);
    let app_state = AppState::new(Arc::new(store));
    let app = api::router(app_state, config.server.request_timeout());

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::graceful(config.server.shutdown_timeout()))
        .await?;

    tracing::info!("Stopping userdb server");
    Ok(())
}

fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let store = open_store(config);
    let envelope = store.get_all()?;

    let mut ids: Vec<&String> = envelope.list.keys().collect();
    ids.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

    println!("Users (next id {}):", envelope.increment.saturating_add(1));
    for id in ids {
        let user = &envelope.list[id];
        println!(
            "  {}  {} <{}>  {}",
            id,
            user.display_name,
            user.email,
            user.created_at.to_rfc3339()
        );
    }

    Ok(())
}

fn open_store(config: &ServerConfig) -> JsonFileStore {
    let span = tracing::info_span!("user_store", path = %config.storage.path.display());
    JsonFileStore::with_span(config.storage.path.clone(), span)
}

fn init_store(config: &ServerConfig) -> anyhow::Result<()> {
    JsonFileStore::seed(&config.storage.path)?;
    tracing::info!("Created empty store at {}", config.storage.path.display());
    Ok(())
}
