use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hodl_racing::{
    args::Args,
    chain::ChainConfig,
    errors::{AppError, AppResult},
    http_server::{start_server, AppState},
    services::{chain_client::ChainClient, leaderboard::LeaderboardService},
    Config, Storage,
};

#[tokio::main]
async fn main() -> AppResult<()> {
    let args = Args::parse();

    let mut config = Config::load(&args.config).map_err(AppError::Config)?;
    if let Some(rpc_url) = args.rpc_url {
        config.chain.rpc_url = rpc_url;
    }

    init_logging(&config.logging.level)?;

    info!("Starting HODL Racing backend v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded from: {}", args.config);

    let chain = ChainConfig::resolve(&config.chain)?;
    info!(
        "Network: {} (chain id {}), claim contract {}",
        chain.network, chain.chain_id, chain.claim_contract
    );

    let db = Arc::new(Storage::connect(config.database_url()).await?);

    if args.print_leaderboard {
        let chain_client = Arc::new(ChainClient::new(&chain));
        let leaderboard = LeaderboardService::new(chain_client, db).build().await;
        let json = serde_json::to_string_pretty(&leaderboard)
            .map_err(|e| AppError::Server(e.to_string()))?;
        println!("{}", json);
        return Ok(());
    }

    let state = AppState::new(Arc::new(config), &chain, db)?;

    let sweeper = state.oauth_states.clone().spawn_sweeper();
    let server = tokio::spawn(start_server(state));

    tokio::select! {
        result = server => {
            error!("HTTP server exited: {:?}", result);
            result.map_err(|e| AppError::Server(e.to_string()))??;
        }
        result = sweeper => {
            error!("OAuth state sweeper exited: {:?}", result);
            result.map_err(|e| AppError::Server(e.to_string()))?;
        }
    }

    Ok(())
}

fn init_logging(level: &str) -> AppResult<()> {
    let log_level = match level.to_lowercase().as_str() {
        "error" => tracing::Level::ERROR,
        "warn" => tracing::Level::WARN,
        "info" => tracing::Level::INFO,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        _ => {
            eprintln!("Invalid log level: {}, defaulting to info", level);
            tracing::Level::INFO
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("hodl_racing={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    Ok(())
}
