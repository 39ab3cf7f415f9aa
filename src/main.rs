use std::sync::Arc;

use tokio::{net::TcpListener, signal::ctrl_c};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use laranotes::{AppState, config::Config, error::StartupError, routes};

#[tokio::main]
async fn main() {
    // Loaded before the subscriber so RUST_LOG may come from .env.
    let dotenv = dotenvy::dotenv();

    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = dotenv {
        info!(".env not loaded: {e}");
    }

    if let Err(e) = run().await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = Config::load()?;

    info!("Initializing state...");
    let app_state = Arc::new(AppState::new(config).await?);

    let listener = TcpListener::bind(&app_state.config.host).await?;
    info!("Server running on {}", app_state.config.host);

    let app = routes::app(app_state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
