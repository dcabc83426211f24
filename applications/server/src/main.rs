/// User Server - gRPC CRUD service over the users table
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use user_server::{config::ServerConfig, server, Lifecycle};

#[derive(Parser)]
#[command(name = "user-server")]
#[command(about = "gRPC user service backed by PostgreSQL", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "USER_SERVER_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    let dotenv_loaded = dotenv::dotenv().is_ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "user_server=info,user_storage=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if !dotenv_loaded {
        tracing::info!("No .env file found. Proceeding with environment variables.");
    }

    let cli = Cli::parse();

    if let Err(e) = serve(cli).await {
        tracing::error!("{}", e);
        return Err(e);
    }

    Ok(())
}

async fn serve(cli: Cli) -> anyhow::Result<()> {
    let lifecycle = Lifecycle::new();

    // Load configuration
    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    tracing::info!("Starting User Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let signal_watcher = lifecycle.spawn_signal_watcher();

    let result = server::run(&config, &lifecycle).await;

    signal_watcher.abort();

    Ok(result?)
}
