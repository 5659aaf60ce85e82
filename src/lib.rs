//! Etudiant service: REST resource for student records over a pluggable store.

pub mod alert;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ServiceConfig, StoreKind};
pub use error::{AppError, ConfigError};
pub use model::Etudiant;
pub use routes::{common_routes_with_ready, etudiant_routes};
pub use service::EtudiantService;
pub use state::AppState;
pub use store::{
    ensure_database_exists, ensure_etudiant_table, EtudiantStore, InMemoryEtudiantStore, PgEtudiantStore,
};

use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;

/// Full application router: common routes plus the etudiant resource, with a request body limit.
pub fn app(state: AppState, config: &ServiceConfig) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(etudiant_routes(state, &config.app_name))
        .layer(ServiceBuilder::new().layer(RequestBodyLimitLayer::new(config.body_limit_bytes)))
}
