use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};

use super::{plain_err, Ctx};

/// Query params for /query. Both default so that a missing parameter reaches
/// the engine's own validation instead of a framework rejection.
#[derive(Debug, serde::Deserialize, Default)]
pub struct QueryParams {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub k: i64,
}

/// Top-k completions of a prefix, one word per line.
pub async fn query(State(ctx): State<Arc<Ctx>>, Query(params): Query<QueryParams>) -> Response {
    match ctx.engine.query(&params.prefix, params.k) {
        Ok(body) => body.into_response(),
        Err(e) => plain_err(e),
    }
}
