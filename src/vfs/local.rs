use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use std::io;
use std::path::Path;
use tokio::fs::File;
use tokio_util::codec::FramedRead;

use super::{utf8::Utf8Chunks, FileSystem};
use crate::common::chunk::ChunkStream;

/// 基于 tokio::fs 的本地文件系统实现
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

#[async_trait]
impl FileSystem for LocalFs {
    async fn exists(&self, path: &Path) -> bool {
        match tokio::fs::try_exists(path).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("[Vfs] Existence check failed for {}: {}", path.display(), e);
                false
            }
        }
    }

    async fn read_all(&self, path: &Path) -> io::Result<Bytes> {
        let data = tokio::fs::read(path).await?;
        Ok(Bytes::from(data))
    }

    async fn open_read_stream(&self, path: &Path, chunk_size: usize) -> io::Result<ChunkStream> {
        let file = File::open(path).await?;
        // 文件句柄由流持有，流被丢弃时随之关闭
        Ok(FramedRead::with_capacity(file, Utf8Chunks, chunk_size).boxed())
    }
}
