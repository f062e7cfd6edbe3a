//! 抓包记录
//!
//! 定义解码后的抓包文件与单条记录。

use serde::Serialize;

use super::cursor::{ByteCursor, ByteOrder};
use super::header::GlobalHeader;
use super::link::LinkFrame;
use super::network::NetworkPacket;
use super::transport::TransportSegment;

/// 解码后的抓包文件（解码完成后不可变）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureFile {
    pub header: GlobalHeader,
    pub records: Vec<PacketRecord>,
}

impl CaptureFile {
    /// 能一路分类到传输层的记录
    pub fn classified(&self) -> impl Iterator<Item = &PacketRecord> {
        self.records.iter().filter(|r| r.transport().is_some())
    }
}

/// 单条记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PacketRecord {
    pub ts_sec: u32,
    pub ts_usec: u32,
    pub captured_len: u32,
    pub original_len: u32,
    pub frame: LinkFrame,
}

impl PacketRecord {
    /// 绝对时间戳（微秒）
    pub fn timestamp_us(&self) -> i64 {
        self.ts_sec as i64 * 1_000_000 + self.ts_usec as i64
    }

    pub fn network(&self) -> Option<&NetworkPacket> {
        let eth = self.frame.ethernet()?;
        match &eth.payload {
            NetworkPacket::Unclassified { .. } => None,
            pkt => Some(pkt),
        }
    }

    /// 已分类的传输层段；任意一层未分类则为 `None`
    pub fn transport(&self) -> Option<&TransportSegment> {
        self.network()?.transport()
    }
}

/// 16 字节记录头
#[derive(Debug, Clone, Copy)]
pub(crate) struct RecordHeader {
    pub ts_sec: u32,
    pub ts_usec: u32,
    pub captured_len: u32,
    pub original_len: u32,
}

impl RecordHeader {
    pub(crate) fn parse(cur: &mut ByteCursor<'_>, order: ByteOrder) -> Option<Self> {
        Some(Self {
            ts_sec: cur.u32(order)?,
            ts_usec: cur.u32(order)?,
            captured_len: cur.u32(order)?,
            original_len: cur.u32(order)?,
        })
    }
}
