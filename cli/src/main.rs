//! EventHub booking service CLI
//!
//! ```sh
//! # Run with default config (~/.config/eventhub-booking/config.toml)
//! eventhub-booking
//!
//! # Custom config path and port
//! eventhub-booking --config /etc/eventhub/config.toml --port 8080
//!
//! # Validate config without starting
//! eventhub-booking --check
//!
//! # Print a bearer token for local testing
//! eventhub-booking --issue-token 42
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use eventhub_booking::config::{AppConfig, CONFIG_ENV};
use eventhub_booking::infrastructure::crypto::jwt::create_token;
use eventhub_booking::server::{init_tracing, ServerHandle, ServerOptions};

#[derive(Parser, Debug)]
#[command(
    name = "eventhub-booking",
    version,
    about = "Event ticketing and hotel booking REST service",
    long_about = "EventHub booking service: tickets, payments and hotel room booking \
                  behind a JWT-protected REST API.\n\n\
                  Default config: ~/.config/eventhub-booking/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Print a signed token for USER_ID and exit.
    #[arg(long, value_name = "USER_ID")]
    issue_token: Option<i32>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(eventhub_booking::default_config_path);

    let loaded = AppConfig::load(&config_path);
    let mut config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => AppConfig::default(),
    };
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    match loaded {
        Ok(_) => info!("Configuration loaded from {}", config_path.display()),
        Err(e) => {
            if cli.check {
                error!("{}", e);
                return Err(e.into());
            }
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    if let Some(port) = cli.port {
        info!("CLI override: api_port = {}", port);
        config.server.api_port = port;
    }

    if let Some(user_id) = cli.issue_token {
        let token = create_token(user_id, &config.security.jwt_config())?;
        println!("{token}");
        return Ok(());
    }

    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        if config.database.in_memory {
            println!("   Database    : in-memory");
        } else {
            println!("   Database    : {}", config.database.connection_url());
        }
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
