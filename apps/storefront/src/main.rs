//! # ToolRent Storefront Server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Server                                │
//! │                                                                         │
//! │  Browser ───► HTTP (8080) ───► Router ───► toolrent-core                │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                        CartState + SandboxGateway                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::net::TcpListener;
use tracing::{error, info};

use toolrent_storefront::config::StorefrontConfig;
use toolrent_storefront::{init_tracing, router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting ToolRent storefront...");

    let config = StorefrontConfig::load()?;
    let addr = config.bind_address();
    info!(
        %addr,
        dev_mode = config.dev_mode(),
        payment_mode = ?config.payment.mode,
        payment_limit_paise = ?config.payment.limit_paise,
        "Configuration loaded"
    );

    let app = router(AppState::new(config));

    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "Storefront listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(%e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(%e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
