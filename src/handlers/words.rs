use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};

use super::{plain_err, Ctx};

/// Query params for the word mutation endpoints. /select also sends a
/// `prefix` parameter from the browser frontend; it is ignored here.
#[derive(Debug, serde::Deserialize, Default)]
pub struct WordParams {
    #[serde(default)]
    pub word: String,
}

/// Add a word to the index.
pub async fn insert(State(ctx): State<Arc<Ctx>>, Query(params): Query<WordParams>) -> Response {
    match ctx.engine.insert(&params.word) {
        Ok(()) => "OK".into_response(),
        Err(e) => plain_err(e),
    }
}

/// Remove a word from the index. A missing word is still acknowledged.
pub async fn delete(State(ctx): State<Arc<Ctx>>, Query(params): Query<WordParams>) -> Response {
    match ctx.engine.delete(&params.word) {
        Ok(found) => {
            if !found {
                log::debug!("delete: word not found: {}", params.word);
            }
            "OK".into_response()
        }
        Err(e) => plain_err(e),
    }
}

/// Record a usage of a word, boosting its popularity.
pub async fn select(State(ctx): State<Arc<Ctx>>, Query(params): Query<WordParams>) -> Response {
    match ctx.engine.select(&params.word) {
        Ok(found) => {
            if !found {
                log::debug!("select: word not found: {}", params.word);
            }
            "OK".into_response()
        }
        Err(e) => plain_err(e),
    }
}
