//! Per-request session refresh and response localization.
//!
//! The portal shares its persisted store with other processes (the `nour`
//! CLI, a second portal). Every request re-reads the store before any
//! handler or extractor runs, so a logout made elsewhere takes effect on
//! the next navigation.
//!
//! Error bodies are rendered in the default locale and tagged with a
//! [`MessageKey`]; on the way out they are re-rendered in the locale the
//! user picked under `/api/preferences`.

use axum::{
    Json,
    body::Body,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use nour_core::Locale;
use nour_session::translate::{Catalog, Translator};

use crate::error::AppError;
use crate::state::AppState;

/// Catalog key of a translatable error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageKey(pub &'static str);

impl MessageKey {
    /// A `{"message": ...}` body in the default locale, tagged with `self`.
    #[must_use]
    pub fn response(self, status: axum::http::StatusCode) -> Response {
        let mut response = (
            status,
            Json(json!({ "message": Catalog::default().t(self.0) })),
        )
            .into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// Reload sessions from the shared store, then localize error bodies.
pub async fn navigation_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if let Err(e) = state.sessions().reload() {
        return AppError::from(e).into_response();
    }
    let catalog = match state.catalog() {
        Ok(catalog) => catalog,
        Err(e) => return AppError::from(e).into_response(),
    };

    let response = next.run(request).await;
    localize(response, &catalog)
}

fn localize(response: Response, catalog: &impl Translator) -> Response {
    let Some(MessageKey(key)) = response.extensions().get::<MessageKey>().copied() else {
        return response;
    };
    if catalog.locale() == Locale::default() {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    let body = json!({ "message": catalog.t(key) }).to_string();
    Response::from_parts(parts, Body::from(body))
}
