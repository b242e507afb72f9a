use std::env;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing for the application.
///
/// Sets up structured logging with info level by default.
/// Uses the RUST_LOG environment variable if set, otherwise defaults to "info".
/// Supports both pretty console output and JSON output based on
/// MPRIS_REMOTE_LOG_FORMAT.
///
/// # Errors
/// Returns error if tracing subscriber initialization fails
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let format = env::var("MPRIS_REMOTE_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let registry = tracing_subscriber::registry().with(env_filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_target(true).with_level(true))
                .try_init()?;
        }
        _ => {
            registry
                .with(fmt::layer().with_target(true).with_level(true))
                .try_init()?;
        }
    }

    Ok(())
}
