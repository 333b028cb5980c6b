use std::path::PathBuf;
use std::sync::Arc;

use crate::common::buffer::BufferCache;
use crate::config::Settings;
use crate::vfs::FileSystem;

/// Web 应用全局状态
///
/// 职责：包含所有跨请求共享的对象，通过 Arc 注入到 Axum 的 Handler 中。
/// 其中只有 `buffer_cache` 是可变的，且只由 `/buffer` 使用。
#[derive(Clone)]
pub struct AppState {
    pub fs: Arc<dyn FileSystem>,
    pub buffer_cache: BufferCache,
    pub buffer_path: PathBuf,
    pub stream_path: PathBuf,
    pub chunk_size: usize,
}

impl AppState {
    pub fn new(settings: &Settings, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            buffer_cache: BufferCache::new(),
            buffer_path: settings.assets.buffer_path(),
            stream_path: settings.assets.stream_path(),
            chunk_size: settings.streaming.chunk_size,
        }
    }
}
