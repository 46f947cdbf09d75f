//! # EventHub booking service
//!
//! Event ticketing, payments and hotel room booking behind a JWT-protected
//! REST API.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: entities, business rules and repository traits
//! - **application**: eligibility, capacity and booking services
//! - **infrastructure**: SeaORM persistence, in-memory storage, JWT
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: runtime bootstrap and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};

pub use interfaces::http::create_api_router;
