//! LegalDost API server binary

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use legaldost_server::{router, AppState, Args};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive(log_level.into())
                .add_directive("tower_http=debug".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting LegalDost server on {}:{}", args.host, args.port);

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit_period_secs)
            .burst_size(args.rate_limit_burst)
            .finish()
            .context("invalid rate limit configuration")?,
    );

    let state = AppState::from_args(&args).await?;
    let upload_dir = state.config.upload_dir.clone();
    let store = state.store.clone();

    let app = router(state).layer(GovernorLayer {
        config: governor_conf,
    });

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!(
        "Rate limit: burst {} per IP, one more every {}s",
        args.rate_limit_burst, args.rate_limit_period_secs
    );
    info!("Uploads stored in {}", upload_dir.display());

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    store.close().await;
    Ok(())
}
