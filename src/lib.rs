//! Cats API: REST CRUD service for a single resource on top of a generic PostgreSQL service layer.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod routes;
pub mod schemas;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use extractors::session::Session;
pub use logging::init_logging;
pub use models::{Cat, Entity};
pub use routes::{app, cat_routes, common_routes};
pub use schemas::{CatCreateSchema, CatSchema, Field};
pub use service::{BaseServiceCrud, CatResource, CatService, CrudResource};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables};
