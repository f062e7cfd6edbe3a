//! 抓包文件解码
//!
//! 纯函数：字节缓冲区 -> `CaptureFile`。任何结构截断都使整个解码失败，不返回部分结果。

use std::path::Path;

use tracing::{debug, info, trace};

use super::cursor::ByteCursor;
use super::error::DecodeError;
use super::header::{GLOBAL_HEADER_LEN, GlobalHeader, RECORD_HEADER_LEN};
use super::link::LinkFrame;
use super::record::{CaptureFile, PacketRecord, RecordHeader};

/// 解码一个完整的抓包缓冲区
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode(bytes: &[u8]) -> Result<CaptureFile, DecodeError> {
    let malformed = || DecodeError::MalformedCapture { have: bytes.len() };
    if bytes.len() < GLOBAL_HEADER_LEN {
        return Err(malformed());
    }

    let mut cur = ByteCursor::new(bytes);
    let header = GlobalHeader::parse(&mut cur).ok_or_else(malformed)?;
    let order = header.byte_order;
    debug!(
        magic = %format!("{:#010x}", header.magic),
        byte_order = ?order,
        link_type = header.link_type,
        snaplen = header.snaplen,
        "全局头"
    );

    let mut records = Vec::new();
    while !cur.is_empty() {
        let index = records.len();
        let offset = cur.position();
        let remaining = cur.remaining();
        let truncated = |needed: usize| DecodeError::TruncatedRecord {
            index,
            offset,
            needed,
            remaining,
        };

        let rh = RecordHeader::parse(&mut cur, order).ok_or_else(|| truncated(RECORD_HEADER_LEN))?;
        let needed = RECORD_HEADER_LEN.saturating_add(rh.captured_len as usize);
        let data = cur
            .take(rh.captured_len as usize)
            .ok_or_else(|| truncated(needed))?;

        trace!(index, offset, captured_len = rh.captured_len, "记录");
        records.push(PacketRecord {
            ts_sec: rh.ts_sec,
            ts_usec: rh.ts_usec,
            captured_len: rh.captured_len,
            original_len: rh.original_len,
            frame: LinkFrame::parse(header.link_type, data),
        });
    }

    let classified = records.iter().filter(|r| r.transport().is_some()).count();
    info!(records = records.len(), classified, "抓包解码完成");
    Ok(CaptureFile { header, records })
}

/// 读取并解码抓包文件
pub fn read_capture(path: impl AsRef<Path>) -> Result<CaptureFile, DecodeError> {
    let bytes = std::fs::read(path.as_ref())?;
    decode(&bytes)
}
