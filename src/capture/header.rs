//! 全局头
//!
//! 24 字节：magic、版本号、时区偏移、时间戳精度、快照长度、链路类型。

use serde::Serialize;

use super::cursor::{ByteCursor, ByteOrder};

/// 规范 magic（大端原生）
pub const MAGIC: u32 = 0xA1B2_C3D4;
/// 字节交换后的 magic：表示文件主体为小端
pub const MAGIC_SWAPPED: u32 = 0xD4C3_B2A1;

pub const GLOBAL_HEADER_LEN: usize = 24;
pub const RECORD_HEADER_LEN: usize = 16;

/// 链路层类型：Ethernet
pub const LINKTYPE_ETHERNET: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalHeader {
    /// 按大端读出的原始 magic
    pub magic: u32,
    pub byte_order: ByteOrder,
    pub version_major: u16,
    pub version_minor: u16,
    /// GMT 时区偏移（秒）
    pub thiszone: i32,
    /// 时间戳精度
    pub sigfigs: u32,
    pub snaplen: u32,
    pub link_type: u32,
}

impl GlobalHeader {
    /// 仅根据 magic 判定字节序：等于交换后的 magic 即小端，否则一律大端。
    pub fn sniff_byte_order(magic: u32) -> ByteOrder {
        if magic == MAGIC_SWAPPED {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }

    /// 调用方已保证至少有 24 字节
    pub(crate) fn parse(cur: &mut ByteCursor<'_>) -> Option<Self> {
        let magic = cur.be_u32()?;
        let order = Self::sniff_byte_order(magic);
        Some(Self {
            magic,
            byte_order: order,
            version_major: cur.u16(order)?,
            version_minor: cur.u16(order)?,
            thiszone: cur.i32(order)?,
            sigfigs: cur.u32(order)?,
            snaplen: cur.u32(order)?,
            link_type: cur.u32(order)?,
        })
    }
}
