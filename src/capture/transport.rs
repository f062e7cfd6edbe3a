//! 传输层：TCP / UDP

use serde::Serialize;

use super::bits::{bit_set, first_n_bits, last_n_bits};
use super::cursor::ByteCursor;

/// IP 协议号
pub mod ip_protocol {
    pub const TCP: u8 = 6;
    pub const UDP: u8 = 17;
}

pub const TCP_BASE_HEADER_LEN: usize = 20;
pub const UDP_HEADER_LEN: usize = 8;

/// 传输层分派结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransportSegment {
    Tcp(TcpSegment),
    Udp(UdpDatagram),
    /// 协议号不支持，或头部放不进剩余字节
    Unclassified { protocol: u8 },
}

impl TransportSegment {
    pub(crate) fn parse(protocol: u8, data: &[u8]) -> Self {
        let seg = match protocol {
            ip_protocol::TCP => TcpSegment::parse(data).map(TransportSegment::Tcp),
            ip_protocol::UDP => UdpDatagram::parse(data).map(TransportSegment::Udp),
            _ => None,
        };
        seg.unwrap_or(TransportSegment::Unclassified { protocol })
    }

    pub fn is_classified(&self) -> bool {
        !matches!(self, TransportSegment::Unclassified { .. })
    }

    /// 应用层载荷
    pub fn payload(&self) -> &[u8] {
        match self {
            TransportSegment::Tcp(t) => &t.payload,
            TransportSegment::Udp(u) => &u.payload,
            TransportSegment::Unclassified { .. } => &[],
        }
    }
}

/// TCP 标志位（LSB = bit 0 = FIN）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TcpFlags {
    pub fin: bool,
    pub syn: bool,
    pub rst: bool,
    pub psh: bool,
    pub ack: bool,
    pub urg: bool,
    pub ece: bool,
    pub cwr: bool,
}

impl TcpFlags {
    pub fn from_byte(b: u8) -> Self {
        Self {
            fin: bit_set(b, 0),
            syn: bit_set(b, 1),
            rst: bit_set(b, 2),
            psh: bit_set(b, 3),
            ack: bit_set(b, 4),
            urg: bit_set(b, 5),
            ece: bit_set(b, 6),
            cwr: bit_set(b, 7),
        }
    }

    pub fn to_byte(self) -> u8 {
        [
            self.fin, self.syn, self.rst, self.psh, self.ack, self.urg, self.ece, self.cwr,
        ]
        .iter()
        .enumerate()
        .fold(0u8, |acc, (bit, set)| if *set { acc | (1 << bit) } else { acc })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TcpSegment {
    pub src_port: u16,
    pub dst_port: u16,
    pub seq: u32,
    pub ack: u32,
    /// 头部长度（32 位字）
    pub data_offset: u8,
    pub reserved: u8,
    pub flags: TcpFlags,
    pub window: u16,
    pub checksum: u16,
    pub urgent_ptr: u16,
    pub options: Vec<u8>,
    pub payload: Vec<u8>,
}

impl TcpSegment {
    fn parse(data: &[u8]) -> Option<Self> {
        let mut cur = ByteCursor::new(data);
        let src_port = cur.be_u16()?;
        let dst_port = cur.be_u16()?;
        let seq = cur.be_u32()?;
        let ack = cur.be_u32()?;
        let off_res = cur.u8()?;
        let flags = TcpFlags::from_byte(cur.u8()?);
        let window = cur.be_u16()?;
        let checksum = cur.be_u16()?;
        let urgent_ptr = cur.be_u16()?;

        let data_offset = first_n_bits(off_res, 4);
        let header_len = data_offset as usize * 4;
        if header_len < TCP_BASE_HEADER_LEN {
            return None;
        }
        let options = cur.take(header_len - TCP_BASE_HEADER_LEN)?.to_vec();
        Some(Self {
            src_port,
            dst_port,
            seq,
            ack,
            data_offset,
            reserved: last_n_bits(off_res, 4),
            flags,
            window,
            checksum,
            urgent_ptr,
            options,
            payload: cur.rest().to_vec(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UdpDatagram {
    pub src_port: u16,
    pub dst_port: u16,
    pub length: u16,
    pub checksum: u16,
    pub payload: Vec<u8>,
}

impl UdpDatagram {
    fn parse(data: &[u8]) -> Option<Self> {
        let mut cur = ByteCursor::new(data);
        Some(Self {
            src_port: cur.be_u16()?,
            dst_port: cur.be_u16()?,
            length: cur.be_u16()?,
            checksum: cur.be_u16()?,
            payload: cur.rest().to_vec(),
        })
    }
}
