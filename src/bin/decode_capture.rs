//! 抓包解码工具
//!
//! 逐条打印记录摘要，或以 JSON 输出完整的解码结构。

use std::path::PathBuf;

use clap::Parser;
use pktfluid_rs::capture::{
    self, LinkFrame, NetworkPacket, PacketRecord, TcpFlags, TransportSegment, format_mac,
};
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "decode-capture", about = "解码传统 pcap 文件：链路层 / 网络层 / 传输层")]
struct Args {
    /// pcap 文件路径
    #[arg(long)]
    capture: PathBuf,

    /// 输出 JSON 而不是文本摘要
    #[arg(long)]
    json: bool,

    /// 最多打印多少条记录
    #[arg(long)]
    limit: Option<usize>,
}

fn flag_names(f: &TcpFlags) -> String {
    let names = [
        (f.fin, "FIN"),
        (f.syn, "SYN"),
        (f.rst, "RST"),
        (f.psh, "PSH"),
        (f.ack, "ACK"),
        (f.urg, "URG"),
        (f.ece, "ECE"),
        (f.cwr, "CWR"),
    ];
    names
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, n)| *n)
        .collect::<Vec<_>>()
        .join(",")
}

fn describe_transport(seg: &TransportSegment) -> String {
    match seg {
        TransportSegment::Tcp(t) => format!(
            "tcp {}->{} [{}] seq={} ack={} payload={}",
            t.src_port,
            t.dst_port,
            flag_names(&t.flags),
            t.seq,
            t.ack,
            t.payload.len()
        ),
        TransportSegment::Udp(u) => format!(
            "udp {}->{} payload={}",
            u.src_port,
            u.dst_port,
            u.payload.len()
        ),
        TransportSegment::Unclassified { protocol } => format!("proto={protocol} (unclassified)"),
    }
}

fn describe(idx: usize, r: &PacketRecord) -> String {
    let head = format!(
        "#{idx} {}.{:06} len={}/{}",
        r.ts_sec, r.ts_usec, r.captured_len, r.original_len
    );
    let eth = match &r.frame {
        LinkFrame::Ethernet(eth) => eth,
        LinkFrame::Unclassified { link_type } => {
            return format!("{head} link_type={link_type} (unclassified)");
        }
    };
    let link = format!(
        "eth {}->{}",
        format_mac(&eth.src_mac),
        format_mac(&eth.dst_mac)
    );
    let net = match &eth.payload {
        NetworkPacket::Ipv4(ip) => format!(
            "ipv4 {}->{} ttl={} {}",
            ip.src,
            ip.dst,
            ip.ttl,
            describe_transport(&ip.transport)
        ),
        NetworkPacket::Ipv6(ip) => format!(
            "ipv6 {}->{} hop={} {}",
            ip.src,
            ip.dst,
            ip.hop_limit,
            describe_transport(&ip.transport)
        ),
        NetworkPacket::Unclassified { ether_type } => {
            format!("ethertype={ether_type:#06x} (unclassified)")
        }
    };
    format!("{head} {link} {net}")
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let cap = capture::read_capture(&args.capture)?;
    let limit = args.limit.unwrap_or(usize::MAX);
    if args.json {
        let shown: Vec<&PacketRecord> = cap.records.iter().take(limit).collect();
        let out = serde_json::json!({
            "header": cap.header,
            "records": shown,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "link_type={} byte_order={:?} version={}.{} snaplen={}",
        cap.header.link_type,
        cap.header.byte_order,
        cap.header.version_major,
        cap.header.version_minor,
        cap.header.snaplen
    );
    for (idx, r) in cap.records.iter().enumerate().take(limit) {
        println!("{}", describe(idx, r));
    }
    println!(
        "records={} classified={}",
        cap.records.len(),
        cap.classified().count()
    );
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        error!(%e, "解码失败");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
