//! Warehouse backend: REST CRUD and reports over a PostgreSQL inventory schema.

pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use response::{success_created, success_many, success_one};
pub use routes::{api_routes, common_routes, common_routes_with_ready};
pub use state::AppState;
pub use store::{ensure_database_exists, Repositories};
