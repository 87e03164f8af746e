//! See [`RequestError`].

use axum::{
    http::{header::ALLOW, StatusCode},
    response::IntoResponse,
};
use thiserror::Error;

use crate::{response::Response, service::ALLOWED_METHODS};

/// An error answering a request, which becomes a plain-text response with the status's reason
/// text as its body.
#[derive(Error, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) enum RequestError {
    /// The `secret` header was missing or wrong, or no secret is configured.
    #[error("missing or incorrect secret")]
    Forbidden,

    /// The request body couldn't be read or isn't valid JSON.
    #[error("request body isn't valid JSON")]
    BadRequest,

    /// The request method isn't one of [`ALLOWED_METHODS`].
    #[error("method not allowed")]
    MethodNotAllowed,

    /// No route matches the request path.
    #[error("route not found")]
    NotFound,
}

impl RequestError {
    /// Gets the [`StatusCode`] associated with this error.
    pub(crate) fn status(self) -> StatusCode {
        match self {
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> axum::response::Response {
        let mut response = Response::new();

        if self == Self::MethodNotAllowed {
            response.header_valid(ALLOW, ALLOWED_METHODS);
        }

        response.plain_error(self.status()).into_response()
    }
}
