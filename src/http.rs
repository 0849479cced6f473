use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};

use crate::handlers::{admin, query, words, Ctx};

/// Initialize HTTP routes.
pub fn init_handlers(ctx: Arc<Ctx>) -> Router {
    Router::new()
        .route("/query", get(query::query))
        .route("/insert", get(words::insert))
        .route("/delete", get(words::delete))
        .route("/select", get(words::select))
        .route("/stats", get(admin::stats))
        .route("/trie", get(admin::dump_trie))
        .layer(middleware::from_fn(cors_middleware))
        .with_state(ctx)
}

/// The browser frontend is served from a different origin, so every response
/// carries a permissive CORS header.
async fn cors_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}
