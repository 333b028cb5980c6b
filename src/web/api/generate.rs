use axum::response::Response;

use crate::common::{
    chunk,
    synthetic::{self, LARGE_STREAM_LINES},
};
use crate::web::utils::streaming::PlainText;

/// 合成数据流接口：无后端文件，逐行生成
pub async fn large_stream_handler() -> Response {
    let lines = synthetic::numbered_lines(LARGE_STREAM_LINES);
    PlainText::stream(chunk::tracked("/large-stream", lines))
}
