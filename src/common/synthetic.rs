use bytes::Bytes;
use futures_util::Stream;
use std::convert::Infallible;

/// `/large-stream` 生成的行数
pub const LARGE_STREAM_LINES: usize = 10_000;

/// 惰性生成 `count` 行文本，序号从 0 严格递增
///
/// 每次被拉取时才格式化下一行，不会预先生成全部内容。
pub fn numbered_lines(count: usize) -> impl Stream<Item = Result<Bytes, Infallible>> + Send {
    async_stream::stream! {
        for index in 0..count {
            yield Ok::<_, Infallible>(Bytes::from(line(index)));
        }
    }
}

fn line(index: usize) -> String {
    format!("This is chunk number {}\n", index)
}
