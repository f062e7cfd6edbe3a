//! 字节游标
//!
//! 抓包容器头部按文件字节序读取；链路层及以上一律按网络字节序（大端）读取。

use serde::Serialize;

/// 多字节字段的字节序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    Big,
    Little,
}

impl ByteOrder {
    pub(crate) fn u16_from(self, b: [u8; 2]) -> u16 {
        match self {
            ByteOrder::Big => u16::from_be_bytes(b),
            ByteOrder::Little => u16::from_le_bytes(b),
        }
    }

    pub(crate) fn u32_from(self, b: [u8; 4]) -> u32 {
        match self {
            ByteOrder::Big => u32::from_be_bytes(b),
            ByteOrder::Little => u32::from_le_bytes(b),
        }
    }
}

/// 只读游标：越界读取返回 `None`，由调用方决定是错误还是"未分类"。
#[derive(Debug, Clone)]
pub(crate) struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// 取出接下来的 `n` 个字节
    pub(crate) fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        if n > self.remaining() {
            return None;
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Some(out)
    }

    /// 取出剩余全部字节
    pub(crate) fn rest(&mut self) -> &'a [u8] {
        let out = &self.buf[self.pos.min(self.buf.len())..];
        self.pos = self.buf.len();
        out
    }

    fn array<const N: usize>(&mut self) -> Option<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Some(out)
    }

    pub(crate) fn u8(&mut self) -> Option<u8> {
        self.array::<1>().map(|b| b[0])
    }

    pub(crate) fn u16(&mut self, order: ByteOrder) -> Option<u16> {
        self.array::<2>().map(|b| order.u16_from(b))
    }

    pub(crate) fn u32(&mut self, order: ByteOrder) -> Option<u32> {
        self.array::<4>().map(|b| order.u32_from(b))
    }

    pub(crate) fn i32(&mut self, order: ByteOrder) -> Option<i32> {
        self.u32(order).map(|v| v as i32)
    }

    pub(crate) fn be_u16(&mut self) -> Option<u16> {
        self.u16(ByteOrder::Big)
    }

    pub(crate) fn be_u32(&mut self) -> Option<u32> {
        self.u32(ByteOrder::Big)
    }

    pub(crate) fn mac(&mut self) -> Option<[u8; 6]> {
        self.array::<6>()
    }

    pub(crate) fn ipv4(&mut self) -> Option<[u8; 4]> {
        self.array::<4>()
    }

    pub(crate) fn ipv6(&mut self) -> Option<[u8; 16]> {
        self.array::<16>()
    }
}
