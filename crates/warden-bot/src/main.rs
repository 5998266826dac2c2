//! Guild Warden entry point
//!
//! Run with:
//! ```bash
//! cargo run -p warden-bot < events.ndjson
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use tracing::{error, info};

use warden_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let _ = try_init_tracing();
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    // Initialize tracing
    if let Err(e) = try_init_tracing_with_config(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(app = %config.app.name, env = ?config.app.env, "Starting Guild Warden...");

    match warden_bot::run(config).await {
        Ok(summary) if summary.failed > 0 => {
            error!(failed = summary.failed, "Some events failed");
            std::process::exit(2);
        }
        Ok(_) => {}
        Err(e) => {
            error!(code = e.error_code(), error = %e, "Guild Warden stopped");
            std::process::exit(1);
        }
    }
}
