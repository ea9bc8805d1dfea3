//! Todo Gateway - GraphQL endpoint plus POST-to-GET relay
//!
//! Provides:
//! - GET /graphql - Embedded todo schema (GraphiQL without a query)
//! - POST /{*path} - Relay to the configured upstream as GET

use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_gateway::{GatewayState, build_router, config::GatewayConfig};

/// Todo Gateway CLI arguments
#[derive(Parser, Debug)]
#[command(name = "todo-gateway")]
#[command(about = "Todo GraphQL gateway and upstream relay", long_about = None)]
struct Args {
    /// Directory holding gateway.toml
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "todo_gateway=debug,tower_http=debug".into())
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "todo_gateway=info,tower_http=info".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rt = tokio::runtime::Builder::new_multi_thread()
        .thread_name("todo-gateway-worker")
        .enable_all()
        .build()?;

    rt.block_on(async_main(args))
}

async fn async_main(args: Args) -> anyhow::Result<()> {
    // Environment variables > config file > defaults
    let config = GatewayConfig::load(&args.config_dir)?;

    let state = Arc::new(GatewayState::new(&config)?);
    let app = build_router(state);

    info!(
        "Relaying POST requests to {} (timeout {}s)",
        config.upstream.base_url, config.upstream.timeout_secs
    );

    let listener = TcpListener::bind(&config.addr).await?;
    info!("Todo Gateway listening on {}", config.addr);
    info!("GraphiQL console at http://{}/graphql", config.addr);

    axum::serve(listener, app).await?;

    Ok(())
}
