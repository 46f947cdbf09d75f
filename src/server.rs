//! Booking service runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: database init, migrations,
//! metrics recorder, REST API and graceful shutdown. The CLI binary is a thin
//! wrapper around it.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::application::Services;
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::{
    init_database, run_migrations, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};
use crate::interfaces::http::create_api_router;
use crate::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};
use crate::shared::{AppError, InfraError};

/// Options for starting the booking service.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

/// Handle to a running booking service.
///
/// ```rust,no_run
/// use eventhub_booking::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider backing the services.
    pub repos: Arc<dyn RepositoryProvider>,
    pub config: AppConfig,
    /// Port the API actually bound to (differs from config when it was 0).
    pub api_port: u16,

    db: Option<DatabaseConnection>,
    shutdown: ShutdownSignal,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Connect storage, run migrations and start serving the API.
    pub async fn start(opts: ServerOptions) -> Result<Self, AppError> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting EventHub booking service...");

        let prometheus_handle = if app_cfg.server.metrics_enabled {
            metrics_handle()
        } else {
            None
        };

        let jwt_config = app_cfg.security.jwt_config();
        info!(
            expiration_hours = jwt_config.expiration_hours,
            issuer = %jwt_config.issuer,
            "JWT verification configured"
        );

        // ── Storage ────────────────────────────────────────────
        let (repos, db): (Arc<dyn RepositoryProvider>, Option<DatabaseConnection>) =
            if app_cfg.database.in_memory {
                warn!("Using in-memory storage; data is lost on shutdown");
                (Arc::new(InMemoryRepositoryProvider::new()), None)
            } else {
                let db_config = app_cfg.database.to_database_config();
                let db = init_database(&db_config)
                    .await
                    .map_err(InfraError::from)?;
                if opts.auto_migrate {
                    run_migrations(&db).await.map_err(InfraError::from)?;
                }
                (Arc::new(SeaOrmRepositoryProvider::new(db.clone())), Some(db))
            };

        let services = Services::new(repos.clone());
        let api_router = create_api_router(services, jwt_config, db.clone(), prometheus_handle);

        // ── REST API ───────────────────────────────────────────
        let listener = tokio::net::TcpListener::bind(app_cfg.server.address())
            .await
            .map_err(InfraError::from)?;
        let local_addr = listener.local_addr().map_err(InfraError::from)?;
        info!("REST API listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let shutdown = ShutdownSignal::new();
        let api_shutdown = shutdown.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            config: app_cfg,
            api_port: local_addr.port(),
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Trigger shutdown on SIGTERM / SIGINT.
    pub fn install_signal_handler(&self) {
        tokio::spawn(listen_for_shutdown_signals(self.shutdown.clone()));
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.trigger();
    }

    /// Wait for the API to drain after shutdown was triggered, bounded by
    /// `server.shutdown_timeout`.
    pub async fn wait(self) {
        let timeout = Duration::from_secs(self.config.server.shutdown_timeout);
        let mut api_task = self.api_task;

        match tokio::time::timeout(timeout, &mut api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API task panicked: {}", e),
            Err(_) => {
                warn!(timeout_secs = timeout.as_secs(), "Shutdown timed out, aborting API task");
                api_task.abort();
            }
        }

        if let Some(db) = self.db {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("Database connection closed");
            }
        }

        info!("EventHub booking service shutdown complete");
    }

    pub async fn shutdown(self) {
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// The global recorder can be installed once per process; later starts reuse it.
fn metrics_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!("Metrics disabled, recorder install failed: {}", e);
                None
            }
        })
        .clone()
}

/// Initialize tracing from the application config.
///
/// Call once at process startup, before [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let result = match config.logging.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("tracing already initialized: {e}");
    }
}
