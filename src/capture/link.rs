//! 链路层：Ethernet II

use serde::Serialize;

use super::cursor::ByteCursor;
use super::header::LINKTYPE_ETHERNET;
use super::network::NetworkPacket;

pub const ETHERNET_HEADER_LEN: usize = 14;

/// 常用 EtherType（IEEE 802，大端）
pub mod ethertype {
    pub const IPV4: u16 = 0x0800;
    pub const ARP: u16 = 0x0806;
    pub const IPV6: u16 = 0x86DD;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkFrame {
    Ethernet(EthernetFrame),
    /// 链路类型不支持，或帧短于链路头
    Unclassified { link_type: u32 },
}

impl LinkFrame {
    pub(crate) fn parse(link_type: u32, data: &[u8]) -> Self {
        let frame = match link_type {
            LINKTYPE_ETHERNET => EthernetFrame::parse(data).map(LinkFrame::Ethernet),
            _ => None,
        };
        frame.unwrap_or(LinkFrame::Unclassified { link_type })
    }

    pub fn ethernet(&self) -> Option<&EthernetFrame> {
        match self {
            LinkFrame::Ethernet(eth) => Some(eth),
            LinkFrame::Unclassified { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EthernetFrame {
    pub dst_mac: [u8; 6],
    pub src_mac: [u8; 6],
    pub ether_type: u16,
    pub payload: NetworkPacket,
}

impl EthernetFrame {
    fn parse(data: &[u8]) -> Option<Self> {
        let mut cur = ByteCursor::new(data);
        let dst_mac = cur.mac()?;
        let src_mac = cur.mac()?;
        // EtherType 恒为大端，与文件字节序无关
        let ether_type = cur.be_u16()?;
        Some(Self {
            dst_mac,
            src_mac,
            ether_type,
            payload: NetworkPacket::parse(ether_type, cur.rest()),
        })
    }
}

/// 格式化为 `aa:bb:cc:dd:ee:ff`
pub fn format_mac(mac: &[u8; 6]) -> String {
    mac.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}
