use serde::Serialize;

use crate::physics::{ParticleState, ServerBoundary, WorldBounds};
use crate::sim::{FrameSink, ParticleSimulator};

/// 可视化事件类型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VizEventKind {
    /// 世界/服务器元信息（作为 t=0 的第一条事件）
    Meta {
        bounds: WorldBounds,
        particle_radius: f64,
        server_capacity_width: f64,
        /// 漏斗两条曲线的细分折线
        server_polylines: Vec<Vec<[f64; 2]>>,
        force_model: String,
    },
    /// 一个 tick 结束后的全部存活粒子
    Frame { particles: Vec<VizParticle> },
    /// 本 tick 处理完毕并移除的粒子
    Removed { ids: Vec<u64> },
}

#[derive(Debug, Clone, Serialize)]
pub struct VizParticle {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub state: ParticleState,
}

/// 一个可回放的事件（JSON）
#[derive(Debug, Clone, Serialize)]
pub struct VizEvent {
    /// 仿真时钟（毫秒）
    pub t_ms: f64,
    #[serde(flatten)]
    pub kind: VizEventKind,
}

/// 一个简单的事件收集器（存内存，仿真结束写 JSON 文件）
#[derive(Debug, Default)]
pub struct VizLogger {
    pub events: Vec<VizEvent>,
    /// 每隔多少个 tick 记录一帧（0 与 1 都表示每帧）
    pub frame_every: u64,
    ticks_seen: u64,
}

impl VizLogger {
    pub fn with_stride(frame_every: u64) -> Self {
        Self {
            frame_every,
            ..Self::default()
        }
    }

    pub fn push(&mut self, ev: VizEvent) {
        self.events.push(ev);
    }

    pub fn frames(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, VizEventKind::Frame { .. }))
            .count()
    }

    pub fn emit_meta(&mut self, sim: &ParticleSimulator, bounds: &WorldBounds) {
        let width = sim.options().server_capacity_width;
        let server = ServerBoundary::new(bounds, width);
        let segs = server.segments();
        let half = segs.len() / 2;
        let server_polylines = [&segs[..half], &segs[half..]]
            .iter()
            .map(|curve| {
                let mut pts: Vec<[f64; 2]> = curve.iter().map(|s| s.a.into()).collect();
                if let Some(last) = curve.last() {
                    pts.push(last.b.into());
                }
                pts
            })
            .collect();
        self.push(VizEvent {
            t_ms: 0.0,
            kind: VizEventKind::Meta {
                bounds: *bounds,
                particle_radius: sim.particle_radius(),
                server_capacity_width: width,
                server_polylines,
                force_model: sim.interaction_name().to_string(),
            },
        });
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.events)
    }
}

impl FrameSink for VizLogger {
    fn on_frame(&mut self, sim: &ParticleSimulator) {
        let t_ms = sim.clock_ms();
        if !sim.removed().is_empty() {
            self.push(VizEvent {
                t_ms,
                kind: VizEventKind::Removed {
                    ids: sim.removed().to_vec(),
                },
            });
        }
        self.ticks_seen += 1;
        if self.frame_every > 1 && (self.ticks_seen - 1) % self.frame_every != 0 {
            return;
        }
        let particles = sim
            .particles()
            .iter()
            .map(|p| VizParticle {
                id: p.id,
                x: p.pos.x,
                y: p.pos.y,
                state: p.state,
            })
            .collect();
        self.push(VizEvent {
            t_ms,
            kind: VizEventKind::Frame { particles },
        });
    }
}
