//! Catalog API: Star Wars planets and characters with per-user favorites, over PostgreSQL.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod state;
pub mod store;
pub mod telemetry;

pub use error::{AppError, ConfigError, Kind};
pub use response::{created, message, success, Envelope};
pub use routes::{app, catalog_routes, common_routes};
pub use service::CatalogService;
pub use settings::Settings;
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_schema, Catalog, MemoryCatalog, PgCatalog};
pub use telemetry::init_tracing;
