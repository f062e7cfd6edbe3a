//! 演示和示例代码
//!
//! 没有抓包文件时，生成一段突发式的 Ethernet/IPv4/TCP 到达序列。

use rand::Rng;

use crate::capture::{
    ByteOrder, CaptureBuilder, DEFAULT_SRC_MAC, TcpFlags, build_ethernet, build_tcp_frame,
    ethertype,
};

/// 合成流量配置选项
#[derive(Debug, Clone)]
pub struct SyntheticTraffic {
    pub packets: u64,
    /// 突发内两个包的注入间隔（微秒）
    pub gap_us: u64,
    pub burst_len: u64,
    /// 两次突发之间的空闲（微秒）
    pub idle_us: u64,
    /// 载荷上限（字节），实际大小在 [0, max] 内随机
    pub max_payload_bytes: u32,
    /// 每隔多少个包插入一个 ARP 帧（不会被调度），0 表示不插入
    pub arp_every: u64,
}

impl Default for SyntheticTraffic {
    fn default() -> Self {
        Self {
            packets: 400,
            gap_us: 2_000,
            burst_len: 40,
            idle_us: 250_000,
            max_payload_bytes: 1_460,
            arp_every: 25,
        }
    }
}

/// 合成抓包的起始时间戳（秒）
pub const SYNTHETIC_EPOCH_SECS: u32 = 1_700_000_000;

impl SyntheticTraffic {
    /// 生成 pcap 字节流
    pub fn build_capture<R: Rng>(&self, order: ByteOrder, rng: &mut R) -> Vec<u8> {
        let mut b = CaptureBuilder::ethernet(order);
        let burst = self.burst_len.max(1);
        let mut t_us: u64 = 0;

        for n in 0..self.packets {
            if n > 0 {
                t_us += if n % burst == 0 { self.idle_us } else { self.gap_us };
            }
            let ts_sec = SYNTHETIC_EPOCH_SECS + (t_us / 1_000_000) as u32;
            let ts_usec = (t_us % 1_000_000) as u32;

            if self.arp_every > 0 && n % self.arp_every == self.arp_every - 1 {
                let arp = build_ethernet([0xff; 6], DEFAULT_SRC_MAC, ethertype::ARP, &[0u8; 28]);
                b = b.record(ts_sec, ts_usec, &arp);
            }

            let len = rng.random_range(0..=self.max_payload_bytes) as usize;
            let payload = vec![0xab; len];
            let flags = TcpFlags {
                psh: len > 0,
                ack: true,
                ..TcpFlags::default()
            };
            let frame = build_tcp_frame(40_000 + (n % 8) as u16, 80, flags, &payload);
            b = b.record(ts_sec, ts_usec, &frame);
        }
        b.finish()
    }
}
