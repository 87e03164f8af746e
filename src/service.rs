//! The tab store's HTTP service. See [`router`] and [`handler`].

use std::sync::Arc;

use axum::{
    body,
    extract::{Request, State},
    http::{HeaderMap, Method, StatusCode},
    routing::any,
    Router,
};
use axum_macros::debug_handler;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{config::Config, request_error::RequestError, response::Response, store::TabStore};

/// The path the tabs are served at.
pub const TABS_PATH: &str = "/api/tabs";

/// The value of the `Allow` header for the tabs route.
pub(crate) const ALLOWED_METHODS: &str = "GET, POST";

/// The request header which must contain the shared secret to overwrite the tabs.
const SECRET_HEADER: &str = "secret";

/// The state shared by all requests.
#[derive(Debug)]
pub struct AppState {
    /// The tabs being served.
    store: TabStore,

    /// The shared secret required to overwrite the tabs, if one is configured.
    secret: Option<String>,

    /// The maximum accepted size of a request body in bytes.
    max_body_bytes: usize,
}

impl AppState {
    /// Constructs the [`AppState`] for a [`TabStore`] and the server's [`Config`].
    pub fn new(store: TabStore, config: &Config) -> Self {
        Self {
            store,
            secret: config.secret.clone(),
            max_body_bytes: config.max_body_bytes,
        }
    }

    /// Checks whether the request headers contain the configured secret. Always `false` if no
    /// secret is configured.
    fn is_authorized(&self, headers: &HeaderMap) -> bool {
        let Some(secret) = &self.secret else {
            return false;
        };

        // `HeaderMap` lookups are case-insensitive, so this also matches `Secret` and `SECRET`.
        headers
            .get(SECRET_HEADER)
            .is_some_and(|value| value.as_bytes() == secret.as_bytes())
    }
}

/// Builds the router serving the tabs at [`TABS_PATH`].
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(TABS_PATH, any(handler))
        .fallback(|| async { RequestError::NotFound })
        .with_state(state)
}

/// The route handler for all methods on [`TABS_PATH`].
///
/// `GET` returns the current tabs. `POST` replaces them with the JSON request body if the
/// `secret` header is correct, then tries to save them to the tabs file.
///
/// # Errors
///
/// See [`RequestError`].
#[debug_handler]
async fn handler(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, RequestError> {
    let (parts, body) = request.into_parts();

    if parts.method == Method::GET {
        return Ok(Response::new().json(&state.store.tabs().await));
    }

    if parts.method != Method::POST {
        return Err(RequestError::MethodNotAllowed);
    }

    if !state.is_authorized(&parts.headers) {
        debug!("Rejected tabs upload with a missing or incorrect secret");
        return Err(RequestError::Forbidden);
    }

    let body = body::to_bytes(body, state.max_body_bytes)
        .await
        .map_err(|error| {
            warn!(%error, "Failed to read tabs upload body");
            RequestError::BadRequest
        })?;

    let tabs: Value = serde_json::from_slice(&body).map_err(|error| {
        warn!(%error, "Failed to parse tabs upload body");
        RequestError::BadRequest
    })?;

    let count = tabs.as_array().map(Vec::len);

    if let Err(error) = state.store.replace(tabs).await {
        // Saving is best-effort. The tabs stay replaced in memory either way.
        warn!(
            path = %state.store.path().display(),
            %error,
            "Unable to save tabs file, keeping tabs in memory only"
        );
    }

    info!(count, "Replaced tabs");

    let mut response = Response::new();
    response.status(StatusCode::NO_CONTENT);

    Ok(response)
}
