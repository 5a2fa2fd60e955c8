/**
 * Submission Server Entry Point
 *
 * Loads configuration, connects to the database and mail relay, and serves
 * the submission API.
 */

use abstract_submissions::backend::server::{create_app, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    tracing::info!("[STARTUP] Server initialization started");

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("[STARTUP] {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!("[STARTUP] Loaded {:?}", config);

    let app = match create_app(&config).await {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("[STARTUP] {}", e);
            std::process::exit(1);
        }
    };

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server is running on port {}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
