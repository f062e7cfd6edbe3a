//! 抓包驱动的粒子仿真
//!
//! 解码抓包文件（或生成合成流量），把每个数据包的到达时间映射成粒子生成时间，
//! 运行固定数量的 tick，可选输出可视化 JSON。

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use pktfluid_rs::capture::{self, ByteOrder};
use pktfluid_rs::demo::SyntheticTraffic;
use pktfluid_rs::physics::WorldBounds;
use pktfluid_rs::sim::{NullSink, ParticleSimulator, SimConfig, SimOptions};
use pktfluid_rs::viz::VizLogger;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "capture-sim", about = "抓包驱动的粒子仿真：数据包到达 -> 粒子生成 -> 服务器处理")]
struct Args {
    /// pcap 文件路径；缺省时使用合成流量
    #[arg(long)]
    capture: Option<PathBuf>,

    /// 合成流量的包数（仅在未指定 --capture 时使用）
    #[arg(long, default_value_t = 400)]
    synthetic_packets: u64,

    /// JSON 配置文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// 切换相互作用模型：sph 或 elastic（与配置相同时保留配置中的参数）
    #[arg(long)]
    model: Option<String>,

    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// 每秒 tick 数（dt = 1 / fps）
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// 随机种子（生成位置抖动）
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// 覆盖服务器颈口宽度
    #[arg(long)]
    server_width: Option<f64>,

    /// 覆盖粒子半径缩放
    #[arg(long)]
    radius_scale: Option<f64>,

    /// 覆盖服务器处理时延（毫秒）
    #[arg(long)]
    latency_ms: Option<f64>,

    /// 世界半宽（世界为 [-w, w] x [-w, w]）
    #[arg(long, default_value_t = 50.0)]
    half_extent: f64,

    /// 输出可视化 JSON 文件
    #[arg(long)]
    viz_json: Option<PathBuf>,

    /// 每隔多少个 tick 记录一帧
    #[arg(long, default_value_t = 1)]
    frame_every: u64,
}

fn build_config(args: &Args) -> Result<SimConfig, Box<dyn std::error::Error>> {
    let mut cfg = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(raw) = &args.model {
        cfg.force_model = cfg.force_model.with_kind(raw)?;
    }
    if let Some(latency) = args.latency_ms {
        cfg.server_latency_ms = latency;
    }
    let mut options: SimOptions = cfg.options;
    if let Some(w) = args.server_width {
        options.server_capacity_width = w;
    }
    if let Some(s) = args.radius_scale {
        options.particle_radius_scale = s;
    }
    cfg.options = options;
    cfg.validate()?;
    Ok(cfg)
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        return Err("fps must be finite and > 0".into());
    }
    let bounds = WorldBounds::new(
        -args.half_extent,
        args.half_extent,
        -args.half_extent,
        args.half_extent,
    );
    bounds.validate()?;
    let mut rng = StdRng::seed_from_u64(args.seed);

    let capture = match &args.capture {
        Some(path) => capture::read_capture(path)?,
        None => {
            let traffic = SyntheticTraffic {
                packets: args.synthetic_packets,
                ..SyntheticTraffic::default()
            };
            let bytes = traffic.build_capture(ByteOrder::Little, &mut rng);
            capture::decode(&bytes)?
        }
    };

    let cfg = build_config(&args)?;
    let dt = 1.0 / args.fps;

    let mut sim = ParticleSimulator::new(cfg)?;
    sim.restart(&bounds)?;
    sim.load_sources(&capture);
    info!(
        records = capture.records.len(),
        scheduled = sim.sources().iter().map(|s| s.len()).sum::<usize>(),
        model = sim.interaction_name(),
        "开始仿真"
    );

    match &args.viz_json {
        Some(out) => {
            let mut viz = VizLogger::with_stride(args.frame_every);
            viz.emit_meta(&sim, &bounds);
            sim.run_ticks(args.ticks, dt, &bounds, &mut rng, &mut viz);
            fs::write(out, viz.to_json()?)?;
            info!(path = %out.display(), events = viz.events.len(), "已写出可视化 JSON");
        }
        None => sim.run_ticks(args.ticks, dt, &bounds, &mut rng, &mut NullSink),
    }

    let stats = sim.stats();
    println!(
        "done @ {:.1}ms, ticks={}, spawned={}, intaken={}, processed={}, live={}, peak_live={}, deferred={}",
        sim.clock_ms(),
        stats.ticks,
        stats.spawned,
        stats.intaken,
        stats.processed,
        sim.particles().len(),
        stats.peak_live,
        stats.deferred_spawns
    );
    Ok(())
}

fn main() {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        error!(%e, "仿真失败");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
