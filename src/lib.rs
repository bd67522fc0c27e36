//! Bookstore API: catalog-driven REST backend for books, orders, and customers on SQLite.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod routes;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;

pub use auth::{verifier_from_settings, CredentialVerifier, Session, StaticCredentials};
pub use config::{bookstore_model, ResolvedEntity, ResolvedModel};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use routes::{app, cors_layer};
pub use service::CrudService;
pub use settings::Settings;
pub use state::AppState;
pub use store::connect;
