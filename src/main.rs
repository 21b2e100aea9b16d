use std::sync::Arc;

use tracing::{error, info};

use contact_mailer::{Config, SmtpRelay, WebServer};

/// Environment variable naming the configuration file.
const CONFIG_PATH_ENV: &str = "CONTACT_MAILER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    // Load configuration
    let config = match Config::load_with_env(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize logging
    if let Err(e) = contact_mailer::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        contact_mailer::logging::init_console_only(&config.logging.level);
    }

    let relay = match SmtpRelay::from_config(&config.smtp, &config.contact) {
        Ok(relay) => relay,
        Err(e) => {
            error!("Failed to configure SMTP relay: {e}");
            std::process::exit(1);
        }
    };

    let server = match WebServer::new(&config, Arc::new(relay)) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to configure web server: {e}");
            std::process::exit(1);
        }
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.server.environment,
        smtp_host = %config.smtp.host,
        smtp_port = config.smtp.port,
        rate_limit = config.rate_limit.max_requests,
        rate_limit_window_secs = config.rate_limit.window_secs,
        allowed_origins = ?config.cors.allowed_origins,
        "Starting contact form API on {}",
        server.addr()
    );

    if let Err(e) = server.run().await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}
