use std::sync::Arc;

use axum::{extract::State, Json};

use super::Ctx;

/// Running request counters, one `key=value` per line.
pub async fn stats(State(ctx): State<Arc<Ctx>>) -> String {
    ctx.engine.stats().to_string()
}

/// JSON dump of the whole trie, consumed by the frontend visualizer.
pub async fn dump_trie(State(ctx): State<Arc<Ctx>>) -> Json<serde_json::Value> {
    Json(ctx.engine.dump())
}
