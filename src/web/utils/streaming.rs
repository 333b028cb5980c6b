use axum::{
    body::Body,
    http::header,
    response::{IntoResponse, Response},
    BoxError,
};
use bytes::Bytes;
use futures_util::TryStream;

pub const TEXT_PLAIN: &str = "text/plain";

/// 纯文本响应构建
///
/// 状态码与 Content-Type 在响应头中一次性提交，先于任何响应体字节。
pub struct PlainText;

impl PlainText {
    /// 已完整物化的响应体
    pub fn full(body: Bytes) -> Response {
        ([(header::CONTENT_TYPE, TEXT_PLAIN)], body).into_response()
    }

    /// 流式响应体，由连接按需拉取
    ///
    /// 流出错时连接被中断；响应体被丢弃时整条流水线随之释放。
    pub fn stream<S>(stream: S) -> Response
    where
        S: TryStream + Send + 'static,
        S::Ok: Into<Bytes>,
        S::Error: Into<BoxError>,
    {
        (
            [(header::CONTENT_TYPE, TEXT_PLAIN)],
            Body::from_stream(stream),
        )
            .into_response()
    }
}
