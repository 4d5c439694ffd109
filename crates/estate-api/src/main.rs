//! Estate API Server entry point
//!
//! Run with:
//! ```bash
//! DATABASE_URL=memory:// JWT_SECRET=dev-secret cargo run -p estate-api
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env` file.

use estate_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        address = %config.api.address(),
        memory = config.database.is_memory(),
        "Starting Estate API Server"
    );

    if let Err(e) = estate_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
