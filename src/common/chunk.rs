//! 分块流水线：数据源 → 转换 → 响应体
//!
//! 所有阶段均为拉取式 `Stream`，只有下游请求下一块时上游才会读取，
//! 因此背压自然地从响应连接一路传递到文件读取。

use bytes::Bytes;
use futures_util::stream::{self, BoxStream, Stream, StreamExt, TryStreamExt};
use std::fmt::Display;
use std::io;

/// 单次请求独占的、只能向前读取的数据块序列
pub type ChunkStream = BoxStream<'static, io::Result<Bytes>>;

/// 逐块转换：无状态、确定性、保持顺序
pub trait ChunkTransform: Send + Sync + 'static {
    fn apply(&self, chunk: Bytes) -> Bytes;
}

/// 大写转换
///
/// 数据源保证每块都落在 UTF-8 字符边界上，因此可以逐块做完整的 Unicode 大写。
/// 不是合法 UTF-8 的块只转换其中的 ASCII 字节。
#[derive(Debug, Clone, Copy, Default)]
pub struct Uppercase;

impl ChunkTransform for Uppercase {
    fn apply(&self, chunk: Bytes) -> Bytes {
        match std::str::from_utf8(&chunk) {
            Ok(text) => Bytes::from(text.to_uppercase()),
            Err(_) => Bytes::from(chunk.to_ascii_uppercase()),
        }
    }
}

/// 在数据源之后挂接转换阶段
pub fn transform<T: ChunkTransform>(source: ChunkStream, stage: T) -> ChunkStream {
    source.map_ok(move |chunk| stage.apply(chunk)).boxed()
}

/// 预取第一个数据块
///
/// 在响应状态码提交之前拉取首块，使打开后立即发生的读取错误仍能以 500 返回。
/// 返回的流会先重放首块，再继续读取剩余部分。
pub async fn prime(mut source: ChunkStream) -> io::Result<ChunkStream> {
    match source.next().await {
        Some(Ok(first)) => Ok(stream::once(async move { Ok(first) })
            .chain(source)
            .boxed()),
        Some(Err(e)) => Err(e),
        None => Ok(stream::empty().boxed()),
    }
}

/// 为响应体包装投递跟踪
///
/// 统计已投递的块数与字节数：正常结束记 debug，出错记 error，
/// 若在结束前被丢弃（客户端断开）记 warn。首个错误之后不再拉取上游。
pub fn tracked<S, E>(label: &'static str, inner: S) -> impl Stream<Item = Result<Bytes, E>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Display + Send + 'static,
{
    async_stream::stream! {
        let mut delivery = Delivery::new(label);
        let mut inner = Box::pin(inner);
        while let Some(item) = inner.next().await {
            match &item {
                Ok(chunk) => delivery.record(chunk.len()),
                Err(e) => delivery.fail(e),
            }
            let failed = item.is_err();
            yield item;
            if failed {
                break;
            }
        }
        delivery.finish();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeliveryState {
    Streaming,
    Finished,
    Failed,
}

struct Delivery {
    label: &'static str,
    chunks: usize,
    bytes: usize,
    state: DeliveryState,
}

impl Delivery {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            chunks: 0,
            bytes: 0,
            state: DeliveryState::Streaming,
        }
    }

    fn record(&mut self, len: usize) {
        self.chunks += 1;
        self.bytes += len;
    }

    fn fail(&mut self, err: &dyn Display) {
        self.state = DeliveryState::Failed;
        tracing::error!(
            "[Stream] {} failed after {} chunks ({} bytes): {}",
            self.label,
            self.chunks,
            self.bytes,
            err
        );
    }

    fn finish(&mut self) {
        if self.state == DeliveryState::Streaming {
            self.state = DeliveryState::Finished;
            tracing::debug!(
                "[Stream] {} completed: {} chunks ({} bytes)",
                self.label,
                self.chunks,
                self.bytes
            );
        }
    }
}

impl Drop for Delivery {
    fn drop(&mut self) {
        if self.state == DeliveryState::Streaming {
            tracing::warn!(
                "[Stream] {} aborted by client after {} chunks ({} bytes)",
                self.label,
                self.chunks,
                self.bytes
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn source(chunks: &[&'static str]) -> ChunkStream {
        let items: Vec<io::Result<Bytes>> = chunks
            .iter()
            .map(|c| Ok(Bytes::from_static(c.as_bytes())))
            .collect();
        stream::iter(items).boxed()
    }

    async fn collect(stream: ChunkStream) -> io::Result<Vec<u8>> {
        let chunks: Vec<Bytes> = stream.try_collect().await?;
        Ok(chunks.concat())
    }

    #[tokio::test]
    async fn uppercase_transform_preserves_order() {
        let piped = transform(source(&["abc", "\n", "def"]), Uppercase);
        assert_eq!(collect(piped).await.unwrap(), b"ABC\nDEF");
    }

    #[test]
    fn uppercase_covers_non_ascii_letters() {
        let out = Uppercase.apply(Bytes::from("straße café über"));
        assert_eq!(out.as_ref(), "STRASSE CAFÉ ÜBER".as_bytes());
    }

    #[test]
    fn uppercase_falls_back_to_ascii_for_invalid_utf8() {
        let out = Uppercase.apply(Bytes::from_static(b"ab\xffcd"));
        assert_eq!(out.as_ref(), b"AB\xffCD");
    }

    #[tokio::test]
    async fn prime_replays_first_chunk() {
        let primed = prime(source(&["one", "two"])).await.unwrap();
        assert_eq!(collect(primed).await.unwrap(), b"onetwo");
    }

    #[tokio::test]
    async fn prime_surfaces_first_error() {
        let failing: ChunkStream = stream::iter(vec![
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
            Ok(Bytes::from_static(b"never")),
        ])
        .boxed();
        let err = prime(failing).await.err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[tokio::test]
    async fn prime_handles_empty_source() {
        let primed = prime(source(&[])).await.unwrap();
        assert!(collect(primed).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn tracked_stops_after_first_error() {
        let pulled = Arc::new(AtomicUsize::new(0));
        let counter = pulled.clone();
        let inner = stream::iter(vec![
            Ok(Bytes::from_static(b"a")),
            Err(io::Error::new(io::ErrorKind::Other, "disk fault")),
            Ok(Bytes::from_static(b"b")),
        ])
        .inspect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let items: Vec<io::Result<Bytes>> = tracked("test", inner).collect().await;
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(items[1].is_err());
        assert_eq!(pulled.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn tracked_is_lazy() {
        let pulled = Arc::new(AtomicUsize::new(0));
        let counter = pulled.clone();
        let inner = stream::iter(0..100).map(move |i| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Infallible>(Bytes::from(i.to_string()))
        });

        let mut body = Box::pin(tracked("lazy", inner));
        body.next().await;
        body.next().await;
        drop(body);

        assert_eq!(pulled.load(Ordering::SeqCst), 2);
    }
}
