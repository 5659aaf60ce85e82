//! Alert headers announcing entity mutations and failures to API clients.
//!
//! Handlers and errors attach an [`Alert`] to the response extensions; the
//! [`render_alert_headers`] middleware turns it into `X-{app}-alert`,
//! `X-{app}-error` and `X-{app}-params` headers using the configured application name.

use axum::{
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue},
    response::Response,
};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Created,
    Updated,
    Deleted,
}

impl AlertKind {
    fn as_str(self) -> &'static str {
        match self {
            AlertKind::Created => "created",
            AlertKind::Updated => "updated",
            AlertKind::Deleted => "deleted",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Alert {
    Entity {
        kind: AlertKind,
        entity_name: &'static str,
        param: String,
    },
    Failure {
        entity_name: &'static str,
        error_key: &'static str,
    },
}

impl Alert {
    pub fn created(entity_name: &'static str, id: impl ToString) -> Self {
        Alert::Entity { kind: AlertKind::Created, entity_name, param: id.to_string() }
    }

    pub fn updated(entity_name: &'static str, id: impl ToString) -> Self {
        Alert::Entity { kind: AlertKind::Updated, entity_name, param: id.to_string() }
    }

    pub fn deleted(entity_name: &'static str, id: impl ToString) -> Self {
        Alert::Entity { kind: AlertKind::Deleted, entity_name, param: id.to_string() }
    }

    pub fn failure(entity_name: &'static str, error_key: &'static str) -> Self {
        Alert::Failure { entity_name, error_key }
    }

    /// Header pairs for this alert under `app_name`. Values that are not valid header text are dropped.
    pub fn headers(&self, app_name: &str) -> HeaderMap {
        let (suffix, message, param) = match self {
            Alert::Entity { kind, entity_name, param } => (
                "alert",
                format!("{}.{}.{}", app_name, entity_name, kind.as_str()),
                param.as_str(),
            ),
            Alert::Failure { entity_name, error_key } => ("error", format!("error.{}", error_key), *entity_name),
        };
        let mut headers = HeaderMap::new();
        insert(&mut headers, &format!("x-{}-{}", app_name, suffix), &message);
        insert(&mut headers, &format!("x-{}-params", app_name), param);
        headers
    }
}

fn insert(headers: &mut HeaderMap, name: &str, value: &str) {
    match (
        HeaderName::from_bytes(name.to_ascii_lowercase().as_bytes()),
        HeaderValue::from_str(value),
    ) {
        (Ok(name), Ok(value)) => {
            headers.insert(name, value);
        }
        _ => tracing::warn!(header = %name, "skipping invalid alert header"),
    }
}

/// Response middleware: renders any [`Alert`] attached to the response as headers.
pub async fn render_alert_headers(State(app_name): State<Arc<str>>, mut response: Response) -> Response {
    if let Some(alert) = response.extensions_mut().remove::<Alert>() {
        response.headers_mut().extend(alert.headers(&app_name));
    }
    response
}
