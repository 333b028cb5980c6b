use bytes::{Bytes, BytesMut};
use std::borrow::Cow;
use std::io;
use tokio_util::codec::Decoder;

/// 按 UTF-8 字符边界切分文本块
///
/// 每次输出缓冲区中所有完整的字符，末尾不完整的多字节字符留到下一次读取。
/// 非法字节序列按有损方式替换为 U+FFFD。
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Chunks;

impl Decoder for Utf8Chunks {
    type Item = Bytes;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> io::Result<Option<Bytes>> {
        let complete = match std::str::from_utf8(src) {
            Ok(_) => src.len(),
            Err(e) => match e.error_len() {
                None => e.valid_up_to(),
                Some(invalid) => e.valid_up_to() + invalid,
            },
        };
        if complete == 0 {
            return Ok(None);
        }
        Ok(Some(lossy(src.split_to(complete))))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> io::Result<Option<Bytes>> {
        if let Some(chunk) = self.decode(src)? {
            return Ok(Some(chunk));
        }
        if src.is_empty() {
            return Ok(None);
        }
        // 文件在多字节字符中间结束
        Ok(Some(lossy(src.split())))
    }
}

fn lossy(chunk: BytesMut) -> Bytes {
    match String::from_utf8_lossy(&chunk) {
        Cow::Borrowed(_) => chunk.freeze(),
        Cow::Owned(text) => Bytes::from(text),
    }
}
