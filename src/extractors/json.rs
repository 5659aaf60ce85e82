//! JSON body extractor whose rejections use the service's error payload.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use serde::de::DeserializeOwned;

/// Like [`axum::Json`], but a malformed body or wrong content type is an [`AppError::BadRequest`].
/// Accepts `application/json` and any `+json` media type.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(AppError::BadRequest(rejection_message(&rejection))),
        }
    }
}

fn rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => "expected a JSON content type".into(),
        other => other.body_text(),
    }
}

/// Media types accepted for partial updates.
pub const PATCH_MEDIA_TYPES: [&str; 2] = ["application/json", "application/merge-patch+json"];

/// JSON body for PATCH: only [`PATCH_MEDIA_TYPES`] are accepted, anything else is
/// [`AppError::UnsupportedMediaType`].
#[derive(Debug)]
pub struct MergePatchBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for MergePatchBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let media_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(media_type_essence)
            .unwrap_or_default();
        if !PATCH_MEDIA_TYPES.contains(&media_type.as_str()) {
            return Err(AppError::UnsupportedMediaType(format!(
                "'{}' (expected one of {})",
                media_type,
                PATCH_MEDIA_TYPES.join(", ")
            )));
        }
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        Ok(MergePatchBody(value))
    }
}

/// `type/subtype` without parameters, lowercased.
fn media_type_essence(raw: &str) -> String {
    raw.split(';').next().unwrap_or("").trim().to_ascii_lowercase()
}
