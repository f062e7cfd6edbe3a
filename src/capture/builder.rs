//! 抓包构造器
//!
//! 生成传统 pcap 格式的字节流（任一字节序），供演示、合成流量和测试使用。

use std::net::Ipv4Addr;

use super::cursor::ByteOrder;
use super::header::{LINKTYPE_ETHERNET, MAGIC};
use super::link::ethertype;
use super::transport::{TcpFlags, ip_protocol};

pub const DEFAULT_SNAPLEN: u32 = 65_535;

#[derive(Debug, Clone)]
pub struct CaptureBuilder {
    order: ByteOrder,
    buf: Vec<u8>,
}

impl CaptureBuilder {
    /// 写入 2.4 版本全局头
    pub fn new(order: ByteOrder, link_type: u32) -> Self {
        let mut b = Self {
            order,
            buf: Vec::new(),
        };
        b.put_u32(MAGIC);
        b.put_u16(2);
        b.put_u16(4);
        b.put_u32(0); // thiszone
        b.put_u32(0); // sigfigs
        b.put_u32(DEFAULT_SNAPLEN);
        b.put_u32(link_type);
        b
    }

    pub fn ethernet(order: ByteOrder) -> Self {
        Self::new(order, LINKTYPE_ETHERNET)
    }

    fn put_u16(&mut self, v: u16) {
        match self.order {
            ByteOrder::Big => self.buf.extend_from_slice(&v.to_be_bytes()),
            ByteOrder::Little => self.buf.extend_from_slice(&v.to_le_bytes()),
        }
    }

    fn put_u32(&mut self, v: u32) {
        match self.order {
            ByteOrder::Big => self.buf.extend_from_slice(&v.to_be_bytes()),
            ByteOrder::Little => self.buf.extend_from_slice(&v.to_le_bytes()),
        }
    }

    /// 追加一条完整记录
    pub fn record(mut self, ts_sec: u32, ts_usec: u32, data: &[u8]) -> Self {
        let len = data.len() as u32;
        self.put_u32(ts_sec);
        self.put_u32(ts_usec);
        self.put_u32(len);
        self.put_u32(len);
        self.buf.extend_from_slice(data);
        self
    }

    /// 追加一条记录，记录头声明 `declared_len`，但只写入 `data`
    pub fn record_declaring(mut self, ts_sec: u32, ts_usec: u32, declared_len: u32, data: &[u8]) -> Self {
        self.put_u32(ts_sec);
        self.put_u32(ts_usec);
        self.put_u32(declared_len);
        self.put_u32(declared_len);
        self.buf.extend_from_slice(data);
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

pub const DEFAULT_SRC_MAC: [u8; 6] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x01];
pub const DEFAULT_DST_MAC: [u8; 6] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x02];

pub fn build_ethernet(dst: [u8; 6], src: [u8; 6], ether_type: u16, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(14 + payload.len());
    out.extend_from_slice(&dst);
    out.extend_from_slice(&src);
    out.extend_from_slice(&ether_type.to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// 20 字节 IPv4 头（DF 置位，TTL 64，校验和置零）
pub fn build_ipv4(src: Ipv4Addr, dst: Ipv4Addr, protocol: u8, payload: &[u8]) -> Vec<u8> {
    let total = (20 + payload.len()) as u16;
    let mut out = Vec::with_capacity(total as usize);
    out.push(0x45);
    out.push(0x00);
    out.extend_from_slice(&total.to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&0x4000u16.to_be_bytes());
    out.push(64);
    out.push(protocol);
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&src.octets());
    out.extend_from_slice(&dst.octets());
    out.extend_from_slice(payload);
    out
}

/// 20 字节 TCP 头，无选项
pub fn build_tcp(src_port: u16, dst_port: u16, seq: u32, ack: u32, flags: TcpFlags, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(20 + payload.len());
    out.extend_from_slice(&src_port.to_be_bytes());
    out.extend_from_slice(&dst_port.to_be_bytes());
    out.extend_from_slice(&seq.to_be_bytes());
    out.extend_from_slice(&ack.to_be_bytes());
    out.push(5 << 4);
    out.push(flags.to_byte());
    out.extend_from_slice(&65_535u16.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(payload);
    out
}

pub fn build_udp(src_port: u16, dst_port: u16, payload: &[u8]) -> Vec<u8> {
    let len = (8 + payload.len()) as u16;
    let mut out = Vec::with_capacity(len as usize);
    out.extend_from_slice(&src_port.to_be_bytes());
    out.extend_from_slice(&dst_port.to_be_bytes());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// Ethernet/IPv4/TCP 整帧（10.0.0.1 -> 10.0.0.2）
pub fn build_tcp_frame(src_port: u16, dst_port: u16, flags: TcpFlags, payload: &[u8]) -> Vec<u8> {
    let tcp = build_tcp(src_port, dst_port, 1, 0, flags, payload);
    let ip = build_ipv4(
        Ipv4Addr::new(10, 0, 0, 1),
        Ipv4Addr::new(10, 0, 0, 2),
        ip_protocol::TCP,
        &tcp,
    );
    build_ethernet(DEFAULT_DST_MAC, DEFAULT_SRC_MAC, ethertype::IPV4, &ip)
}
