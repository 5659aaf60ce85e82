//! Etudiant resource handlers: create, update, partial update, list, read, delete.

use crate::alert::Alert;
use crate::error::AppError;
use crate::extractors::json::{JsonBody, MergePatchBody};
use crate::model::{Etudiant, ENTITY_NAME};
use crate::response::{created, no_content, ok_with_alert};
use crate::service::EtudiantService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};

pub const BASE_PATH: &str = "/api/etudiants";

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str.parse().map_err(|_| AppError::BadRequest("invalid id".into()))
}

/// Rows returned by the store always carry an id.
fn stored_id(etudiant: &Etudiant) -> String {
    etudiant.id.map(|id| id.to_string()).unwrap_or_default()
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Etudiant>,
) -> Result<Response, AppError> {
    tracing::debug!(etudiant = ?body, "REST request to save Etudiant");
    let saved = EtudiantService::create(state.store.as_ref(), body).await?;
    let id = stored_id(&saved);
    Ok(created(format!("{}/{}", BASE_PATH, id), saved, Alert::created(ENTITY_NAME, id)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody<Etudiant>,
) -> Result<Response, AppError> {
    tracing::debug!(id = %id_str, etudiant = ?body, "REST request to update Etudiant");
    let id = parse_id(&id_str)?;
    let saved = EtudiantService::update(state.store.as_ref(), id, body).await?;
    Ok(ok_with_alert(saved, Alert::updated(ENTITY_NAME, id)))
}

pub async fn partial_update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    MergePatchBody(body): MergePatchBody<Etudiant>,
) -> Result<Response, AppError> {
    tracing::debug!(id = %id_str, etudiant = ?body, "REST request to partial update Etudiant");
    let id = parse_id(&id_str)?;
    let saved = EtudiantService::partial_update(state.store.as_ref(), id, body).await?;
    Ok(ok_with_alert(saved, Alert::updated(ENTITY_NAME, id)))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    tracing::debug!("REST request to get all Etudiants");
    let rows = EtudiantService::list(state.store.as_ref()).await?;
    Ok(Json(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(id = %id_str, "REST request to get Etudiant");
    let id = parse_id(&id_str)?;
    let row = EtudiantService::read(state.store.as_ref(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("etudiant {}", id)))?;
    Ok(Json(row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Response, AppError> {
    tracing::debug!(id = %id_str, "REST request to delete Etudiant");
    let id = parse_id(&id_str)?;
    EtudiantService::delete(state.store.as_ref(), id).await?;
    Ok(no_content(Alert::deleted(ENTITY_NAME, id)))
}
