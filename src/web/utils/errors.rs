use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::io;
use std::path::PathBuf;

pub const NOT_FOUND_MESSAGE: &str = "File not found";
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// 响应提交之前可能发生的错误
///
/// 详细信息只写入日志，客户端只会看到固定的提示文本。
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ServeError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// 供 `map_err` 使用的构造器
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        match &self {
            Self::NotFound { .. } => {
                tracing::warn!("[Serve] {}", self);
                (self.status(), NOT_FOUND_MESSAGE).into_response()
            }
            Self::Io { .. } => {
                tracing::error!("[Serve] {}", self);
                (self.status(), SERVER_ERROR_MESSAGE).into_response()
            }
        }
    }
}
