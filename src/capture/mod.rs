//! 抓包文件解码模块
//!
//! 把传统 pcap 容器（24 字节全局头 + 若干 16 字节记录头/载荷）解码成
//! 链路层 / 网络层 / 传输层的结构化帧序列。每一层都是封闭的和类型，
//! 带显式的 `Unclassified` 分支：无法识别的协议不是错误。

mod bits;
mod builder;
mod cursor;
mod decode;
mod error;
mod header;
mod link;
mod network;
mod record;
mod transport;

pub use bits::{bit_set, first_n_bits, first_n_bits_u16, last_n_bits, last_n_bits_u16};
pub use builder::{
    CaptureBuilder, DEFAULT_DST_MAC, DEFAULT_SNAPLEN, DEFAULT_SRC_MAC, build_ethernet, build_ipv4,
    build_tcp, build_tcp_frame, build_udp,
};
pub use cursor::ByteOrder;
pub use decode::{decode, read_capture};
pub use error::DecodeError;
pub use header::{
    GLOBAL_HEADER_LEN, GlobalHeader, LINKTYPE_ETHERNET, MAGIC, MAGIC_SWAPPED, RECORD_HEADER_LEN,
};
pub use link::{EthernetFrame, LinkFrame, ethertype, format_mac};
pub use network::{Ipv4Flags, Ipv4Packet, Ipv6Packet, NetworkPacket};
pub use record::{CaptureFile, PacketRecord};
pub use transport::{TcpFlags, TcpSegment, TransportSegment, UdpDatagram, ip_protocol};
