//! 文件系统协作者
//!
//! 处理器只通过 [`FileSystem`] 访问磁盘，便于在测试中替换为内存实现
//! 或注入故障。

mod local;
mod utf8;


use async_trait::async_trait;
use bytes::Bytes;
use std::io;
use std::path::Path;

use crate::common::chunk::ChunkStream;

pub use local::LocalFs;
pub use utf8::Utf8Chunks;

#[async_trait]
pub trait FileSystem: Send + Sync {
    /// 文件是否存在；无法判断时视为不存在
    async fn exists(&self, path: &Path) -> bool;

    /// 一次性读取整个文件
    async fn read_all(&self, path: &Path) -> io::Result<Bytes>;

    /// 打开按块读取的文本流，块边界总落在 UTF-8 字符边界上
    ///
    /// `chunk_size` 是单次读取的缓冲区大小。
    async fn open_read_stream(&self, path: &Path, chunk_size: usize) -> io::Result<ChunkStream>;
}
