use bytes::Bytes;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Process-wide memoized file content.
///
/// The buffer starts empty and is filled at most once, by the first successful
/// populate call. Once set it is never replaced or invalidated. Concurrent
/// first callers are coalesced: one runs the populate future, the rest await
/// its result. A populate that fails leaves the cache empty, so the next caller
/// tries again.
#[derive(Clone, Default)]
pub struct BufferCache {
    cell: Arc<OnceCell<Bytes>>,
}

impl BufferCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached content if it has been populated.
    pub fn get(&self) -> Option<Bytes> {
        self.cell.get().cloned()
    }

    pub fn is_populated(&self) -> bool {
        self.cell.initialized()
    }

    /// Returns the cached content, running `populate` first if the cache is empty.
    ///
    /// `populate` is not invoked at all once the cache holds a value.
    pub async fn get_or_populate<F, Fut, E>(&self, populate: F) -> Result<Bytes, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Bytes, E>>,
    {
        self.cell.get_or_try_init(populate).await.cloned()
    }
}
