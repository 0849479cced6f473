pub mod admin;
pub mod query;
pub mod words;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::engine::{Engine, Error};

/// Application context passed to all handlers.
pub struct Ctx {
    pub engine: Arc<Engine>,
}

/// Map an engine error to its plain-text response. The body string is the
/// wire contract; the status code is a transport detail.
pub fn plain_err(err: Error) -> Response {
    (StatusCode::BAD_REQUEST, err.to_string()).into_response()
}
