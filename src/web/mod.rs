pub mod api;
pub mod state;
pub mod utils;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::web::{
    api::{files, generate},
    state::AppState,
};

/// 路由定义
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/buffer", get(files::buffer_handler))
        .route("/stream", get(files::stream_handler))
        .route("/large-stream", get(generate::large_stream_handler))
        .with_state(state)
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
}
