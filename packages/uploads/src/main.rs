use tracing_subscriber::{fmt, EnvFilter};

use uploads::config::Config;

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = uploads::start_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
