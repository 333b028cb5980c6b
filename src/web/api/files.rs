use axum::{extract::State, response::Response};
use bytes::Bytes;
use std::sync::Arc;

use crate::common::chunk::{self, Uppercase};
use crate::web::{
    state::AppState,
    utils::{errors::ServeError, streaming::PlainText},
};

/// 缓存文件接口
///
/// 首次请求时整体读取文件并写入缓存，之后直接返回缓存内容，不再访问磁盘。
pub async fn buffer_handler(State(state): State<Arc<AppState>>) -> Result<Response, ServeError> {
    let body = load_buffer(&state).await?;
    Ok(PlainText::full(body))
}

async fn load_buffer(state: &AppState) -> Result<Bytes, ServeError> {
    let path = &state.buffer_path;
    state
        .buffer_cache
        .get_or_populate(|| async move {
            if !state.fs.exists(path).await {
                return Err(ServeError::not_found(path));
            }
            let data = state.fs.read_all(path).await.map_err(ServeError::io(path))?;
            tracing::info!("[Buffer] Cached {} bytes from {}", data.len(), path.display());
            Ok(data)
        })
        .await
}

/// 流式转换接口
///
/// 文件按块读取，每块经转换后立即交给响应体，内存中不保留整个文件。
pub async fn stream_handler(State(state): State<Arc<AppState>>) -> Result<Response, ServeError> {
    let path = &state.stream_path;
    if !state.fs.exists(path).await {
        return Err(ServeError::not_found(path));
    }

    let source = state
        .fs
        .open_read_stream(path, state.chunk_size)
        .await
        .map_err(ServeError::io(path))?;
    let pipeline = chunk::transform(source, Uppercase);

    // 首块读取失败时仍可返回 500
    let pipeline = chunk::prime(pipeline).await.map_err(ServeError::io(path))?;

    Ok(PlainText::stream(chunk::tracked("/stream", pipeline)))
}
