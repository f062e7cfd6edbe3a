use std::net::Ipv4Addr;

use crate::capture::{
    self, ByteOrder, CaptureBuilder, DEFAULT_DST_MAC, DEFAULT_SRC_MAC, TcpFlags, build_ethernet,
    build_ipv4, build_tcp_frame, build_udp, ethertype, ip_protocol,
};
use crate::physics::Vec2;
use crate::sim::ParticleSource;

fn ack() -> TcpFlags {
    TcpFlags {
        ack: true,
        ..TcpFlags::default()
    }
}

#[test]
fn fire_times_are_relative_to_first_qualifying_record() {
    let arp = build_ethernet([0xff; 6], DEFAULT_SRC_MAC, ethertype::ARP, &[0u8; 28]);
    let udp = build_ethernet(
        DEFAULT_DST_MAC,
        DEFAULT_SRC_MAC,
        ethertype::IPV4,
        &build_ipv4(
            Ipv4Addr::new(10, 0, 0, 3),
            Ipv4Addr::new(10, 0, 0, 4),
            ip_protocol::UDP,
            &build_udp(1000, 2000, &[0u8; 12]),
        ),
    );
    let bytes = CaptureBuilder::ethernet(ByteOrder::Little)
        .record(99, 999_000, &arp)
        .record(100, 0, &build_tcp_frame(1, 2, ack(), &[0u8; 5]))
        .record(100, 500, &arp)
        .record(100, 1_500, &build_tcp_frame(1, 2, ack(), &[]))
        .record(100, 4_000, &udp)
        .finish();
    let cap = capture::decode(&bytes).expect("decode");
    assert_eq!(cap.records.len(), 5);

    let src = ParticleSource::from_capture(&cap, Vec2::new(0.0, 45.0));
    assert_eq!(src.fire_times(), vec![0.0, 1.5, 4.0]);
    let payloads: Vec<u32> = src.queue().iter().map(|e| e.payload_bytes).collect();
    assert_eq!(payloads, vec![5, 0, 12]);
    assert!(src.queue().iter().all(|e| !e.fired));
    assert_eq!(src.pending(), 3);
}

#[test]
fn capture_without_transport_records_schedules_nothing() {
    let arp = build_ethernet([0xff; 6], DEFAULT_SRC_MAC, ethertype::ARP, &[0u8; 28]);
    let bytes = CaptureBuilder::ethernet(ByteOrder::Big)
        .record(1, 0, &arp)
        .finish();
    let cap = capture::decode(&bytes).expect("decode");
    let src = ParticleSource::from_capture(&cap, Vec2::ZERO);
    assert!(src.is_empty());
    assert_eq!(src.pending(), 0);
}

#[test]
fn out_of_order_entries_are_sorted_stably() {
    let src = ParticleSource::new(Vec2::ZERO, [(3.0, 1), (1.0, 2), (3.0, 3), (0.0, 4)]);
    assert_eq!(src.fire_times(), vec![0.0, 1.0, 3.0, 3.0]);
    let payloads: Vec<u32> = src.queue().iter().map(|e| e.payload_bytes).collect();
    assert_eq!(payloads, vec![4, 2, 1, 3]);
}
