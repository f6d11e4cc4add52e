//! # Uploads: signed direct-upload URLs for DigitalOcean Spaces
//!
//! A small HTTP service handing browsers short-lived pre-signed `PUT` URLs, so
//! files go straight to object storage without passing through the backend.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /test` | `Server is running` |
//! | `GET /generate-url?filename=<name>` | `{ success, uploadUrl, fileUrl }` |
//!
//! Uploaded objects are public-read; `fileUrl` is where they can be fetched.

use std::{io, sync::Arc};

use axum::{routing::get, Router};
use tokio::{
    net::TcpListener,
    signal::ctrl_c,
};
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub mod config;
pub mod error;
pub mod presign;
pub mod routes;
pub mod spaces;
pub mod state;

use config::Config;
use routes::{generate_url_handler, health_handler};
use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/test", get(health_handler))
        .route("/generate-url", get(generate_url_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: Config) -> io::Result<()> {
    let state = AppState::new(&config);
    info!(
        bucket = %config.spaces.bucket,
        region = %config.spaces.region,
        "Signing uploads"
    );

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
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
}
