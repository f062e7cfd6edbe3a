//! 网络层：IPv4 / IPv6
//!
//! 只解析固定头部与选项字节，不校验校验和，也不做分片重组。

use std::net::{Ipv4Addr, Ipv6Addr};

use serde::Serialize;

use super::bits::{first_n_bits, first_n_bits_u16, last_n_bits, last_n_bits_u16};
use super::cursor::ByteCursor;
use super::link::ethertype;
use super::transport::TransportSegment;

pub const IPV4_BASE_HEADER_LEN: usize = 20;
pub const IPV6_HEADER_LEN: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NetworkPacket {
    Ipv4(Ipv4Packet),
    Ipv6(Ipv6Packet),
    /// EtherType 不支持，或头部放不进帧
    Unclassified { ether_type: u16 },
}

impl NetworkPacket {
    pub(crate) fn parse(ether_type: u16, data: &[u8]) -> Self {
        let pkt = match ether_type {
            ethertype::IPV4 => Ipv4Packet::parse(data).map(NetworkPacket::Ipv4),
            ethertype::IPV6 => Ipv6Packet::parse(data).map(NetworkPacket::Ipv6),
            _ => None,
        };
        pkt.unwrap_or(NetworkPacket::Unclassified { ether_type })
    }

    pub fn transport(&self) -> Option<&TransportSegment> {
        let seg = match self {
            NetworkPacket::Ipv4(p) => &p.transport,
            NetworkPacket::Ipv6(p) => &p.transport,
            NetworkPacket::Unclassified { .. } => return None,
        };
        seg.is_classified().then_some(seg)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Ipv4Flags {
    pub dont_fragment: bool,
    pub more_fragments: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ipv4Packet {
    pub version: u8,
    /// 头部长度（字节，IHL * 4）
    pub header_len: u8,
    pub dscp: u8,
    pub ecn: u8,
    pub total_len: u16,
    pub identification: u16,
    pub flags: Ipv4Flags,
    pub fragment_offset: u16,
    pub ttl: u8,
    pub protocol: u8,
    pub checksum: u16,
    pub src: Ipv4Addr,
    pub dst: Ipv4Addr,
    pub options: Vec<u8>,
    pub transport: TransportSegment,
}

impl Ipv4Packet {
    fn parse(data: &[u8]) -> Option<Self> {
        let mut cur = ByteCursor::new(data);
        let ver_ihl = cur.u8()?;
        let dscp_ecn = cur.u8()?;
        let total_len = cur.be_u16()?;
        let identification = cur.be_u16()?;
        let flags_frag = cur.be_u16()?;
        let ttl = cur.u8()?;
        let protocol = cur.u8()?;
        let checksum = cur.be_u16()?;
        let src = Ipv4Addr::from(cur.ipv4()?);
        let dst = Ipv4Addr::from(cur.ipv4()?);

        let header_len = last_n_bits(ver_ihl, 4) as usize * 4;
        if header_len < IPV4_BASE_HEADER_LEN {
            return None;
        }
        let options = cur.take(header_len - IPV4_BASE_HEADER_LEN)?.to_vec();

        // 标志位取前 3 位：bit1 = DF，bit0 = MF
        let flag_bits = first_n_bits_u16(flags_frag, 3);
        let flags = Ipv4Flags {
            dont_fragment: flag_bits & 0b010 != 0,
            more_fragments: flag_bits & 0b001 != 0,
        };

        Some(Self {
            version: first_n_bits(ver_ihl, 4),
            header_len: header_len as u8,
            dscp: first_n_bits(dscp_ecn, 6),
            ecn: last_n_bits(dscp_ecn, 2),
            total_len,
            identification,
            flags,
            fragment_offset: last_n_bits_u16(flags_frag, 13),
            ttl,
            protocol,
            checksum,
            src,
            dst,
            options,
            transport: TransportSegment::parse(protocol, cur.rest()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ipv6Packet {
    pub version: u8,
    pub traffic_class: u8,
    pub flow_label: u32,
    pub payload_len: u16,
    pub next_header: u8,
    pub hop_limit: u8,
    pub src: Ipv6Addr,
    pub dst: Ipv6Addr,
    /// 仅按 next_header 直接分派，不遍历扩展头
    pub transport: TransportSegment,
}

impl Ipv6Packet {
    fn parse(data: &[u8]) -> Option<Self> {
        let mut cur = ByteCursor::new(data);
        let word = cur.be_u32()?;
        let payload_len = cur.be_u16()?;
        let next_header = cur.u8()?;
        let hop_limit = cur.u8()?;
        let src = Ipv6Addr::from(cur.ipv6()?);
        let dst = Ipv6Addr::from(cur.ipv6()?);
        Some(Self {
            version: (word >> 28) as u8,
            traffic_class: ((word >> 20) & 0xff) as u8,
            flow_label: word & 0x000f_ffff,
            payload_len,
            next_header,
            hop_limit,
            src,
            dst,
            transport: TransportSegment::parse(next_header, cur.rest()),
        })
    }
}
