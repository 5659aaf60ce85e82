//! Etudiant resource routes under `/api/etudiants`.

use crate::alert::render_alert_headers;
use crate::handlers::etudiant::{create, delete as delete_handler, list, partial_update, read, update, BASE_PATH};
use crate::state::AppState;
use axum::{middleware, routing::get, Router};
use std::sync::Arc;

/// Resource routes. Alert headers are rendered as `X-{app_name}-alert` / `-error` / `-params`.
pub fn etudiant_routes(state: AppState, app_name: &str) -> Router {
    Router::new()
        .route(BASE_PATH, get(list).post(create))
        .route(
            &format!("{}/:id", BASE_PATH),
            get(read).put(update).patch(partial_update).delete(delete_handler),
        )
        .with_state(state)
        .layer(middleware::map_response_with_state(Arc::<str>::from(app_name), render_alert_headers))
}
