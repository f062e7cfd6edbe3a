//! 粒子仿真器
//!
//! 离散时间、单线程：一次 `step()` 完整执行完才会开始下一次。每个 tick 的顺序固定：
//! 推进时钟 -> 触发到期的生成条目 -> 重建四叉树 -> 重力/相互作用/墙壁/服务器碰撞
//! -> 积分位置 -> 服务器入口判定与移除。

use rand::Rng;
use tracing::{debug, info, trace, warn};

use crate::capture::CaptureFile;
use crate::physics::{
    Interaction, Particle, ParticleState, ServerBoundary, Vec2, WorldBounds, build_interaction,
    resolve_walls,
};
use crate::spatial::{QuadTree, Rect};

use super::config::{ConfigError, SimConfig, SimOptions};
use super::frame::FrameSink;
use super::source::ParticleSource;
use super::stats::SimStats;

#[derive(Debug)]
pub struct ParticleSimulator {
    cfg: SimConfig,
    options: SimOptions,
    interaction: Box<dyn Interaction>,
    clock_ms: f64,
    bounds: WorldBounds,
    particles: Vec<Particle>,
    sources: Vec<ParticleSource>,
    removed: Vec<u64>,
    next_id: u64,
    stats: SimStats,
}

impl ParticleSimulator {
    pub fn new(cfg: SimConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let interaction = build_interaction(&cfg.force_model);
        info!(model = interaction.name(), max_particles = cfg.max_particles, "创建粒子仿真器");
        Ok(Self {
            options: cfg.options,
            interaction,
            cfg,
            clock_ms: 0.0,
            bounds: WorldBounds::default(),
            particles: Vec::new(),
            sources: Vec::new(),
            removed: Vec::new(),
            next_id: 0,
            stats: SimStats::default(),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    pub fn options(&self) -> SimOptions {
        self.options
    }

    /// 设置粒子半径缩放与服务器容量；下一个 tick 生效
    pub fn set_options(&mut self, options: SimOptions) -> Result<(), ConfigError> {
        options.validate()?;
        debug!(?options, "更新选项");
        self.options = options;
        Ok(())
    }

    pub fn interaction_name(&self) -> &'static str {
        self.interaction.name()
    }

    /// 当前粒子半径
    pub fn particle_radius(&self) -> f64 {
        self.cfg.particle_radius * self.options.particle_radius_scale
    }

    /// 仿真时钟（毫秒）
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// 最近一次 step/restart 使用的世界边界
    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn positions(&self) -> Vec<Vec2> {
        self.particles.iter().map(|p| p.pos).collect()
    }

    pub fn sources(&self) -> &[ParticleSource] {
        &self.sources
    }

    /// 上一个 tick 移除的粒子 id
    pub fn removed(&self) -> &[u64] {
        &self.removed
    }

    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// 所有源都已触发完毕且没有存活粒子
    pub fn is_drained(&self) -> bool {
        self.particles.is_empty() && self.sources.iter().all(|s| s.pending() == 0)
    }

    /// 清空粒子、复位所有源的 `fired` 标志、时钟归零。幂等。边界无效时不改动任何状态。
    pub fn restart(&mut self, bounds: &WorldBounds) -> Result<(), ConfigError> {
        bounds.validate()?;
        self.reset(bounds);
        Ok(())
    }

    fn reset(&mut self, bounds: &WorldBounds) {
        self.particles.clear();
        self.removed.clear();
        for s in &mut self.sources {
            s.reset();
        }
        self.clock_ms = 0.0;
        self.bounds = *bounds;
        self.next_id = 0;
        self.stats = SimStats::default();
        debug!(sources = self.sources.len(), "仿真重启");
    }

    /// 用抓包构造单一粒子源（替换已有源）并重启
    pub fn load_sources(&mut self, capture: &CaptureFile) {
        let source = ParticleSource::from_capture(capture, Vec2::from(self.cfg.source_origin));
        info!(scheduled = source.len(), "加载粒子源");
        self.sources = vec![source];
        let bounds = self.bounds;
        self.reset(&bounds);
    }

    pub fn add_source(&mut self, source: ParticleSource) {
        self.sources.push(source);
    }

    /// 直接插入一个粒子（位置钳制到世界内）；达到上限或边界无效时返回 `None`
    pub fn insert_particle(&mut self, pos: Vec2, vel: Vec2, bounds: &WorldBounds) -> Option<u64> {
        if self.particles.len() >= self.cfg.max_particles || bounds.validate().is_err() {
            return None;
        }
        Some(self.push_particle(pos, vel, 0, bounds))
    }

    fn push_particle(&mut self, pos: Vec2, vel: Vec2, payload_bytes: u32, bounds: &WorldBounds) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let pos = bounds.clamp(pos);
        self.particles.push(Particle::new(id, pos, vel, payload_bytes));
        self.stats.spawned += 1;
        self.stats.peak_live = self.stats.peak_live.max(self.particles.len());
        trace!(id, x = pos.x, y = pos.y, payload_bytes, "生成粒子");
        id
    }

    /// 使用当前选项与配置的服务器时延推进一个 tick
    pub fn tick<R: Rng>(&mut self, dt_secs: f64, bounds: &WorldBounds, rng: &mut R) {
        let width = self.options.server_capacity_width;
        let latency = self.cfg.server_latency_ms;
        self.step(dt_secs, bounds, width, latency, rng);
    }

    /// 推进恰好一个 tick。给定相同输入与相同的随机源状态，结果确定。
    ///
    /// 边界无效（非有限或上下/左右颠倒）时整个 tick 被跳过，时钟不前进。
    #[tracing::instrument(level = "trace", skip(self, bounds, rng))]
    pub fn step<R: Rng>(
        &mut self,
        dt_secs: f64,
        bounds: &WorldBounds,
        server_capacity_width: f64,
        server_latency_ms: f64,
        rng: &mut R,
    ) {
        if let Err(e) = bounds.validate() {
            warn!(%e, "边界无效，跳过本 tick");
            return;
        }
        let dt = if dt_secs.is_finite() && dt_secs > 0.0 {
            dt_secs
        } else {
            0.0
        };
        self.bounds = *bounds;
        self.removed.clear();
        self.stats.ticks += 1;

        // 1. 时钟
        self.clock_ms += dt * 1_000.0;

        // 2. 生成
        self.spawn_due(bounds, rng);

        // 3. 空间索引
        let index = self.build_index(bounds);

        // 4. 受力与碰撞
        let radius = self.particle_radius();
        let gravity = Vec2::from(self.cfg.gravity);
        for p in &mut self.particles {
            p.vel += gravity * dt;
        }
        self.interaction.apply(&mut self.particles, &index, radius, dt);

        let server = ServerBoundary::new(bounds, server_capacity_width);
        for p in &mut self.particles {
            resolve_walls(p, bounds, self.cfg.wall_damping);
            server.collide(p, radius, self.cfg.server_damping);
            p.cap_speed(self.cfg.max_speed);
        }

        // 5. 积分；再次钳制保证 tick 结束时所有粒子都在世界内
        for p in &mut self.particles {
            p.pos += p.vel * dt;
            resolve_walls(p, bounds, self.cfg.wall_damping);
            if p.state == ParticleState::Spawned {
                p.state = ParticleState::InFlight;
            }
        }

        // 6. 服务器入口与处理完成
        self.process_intake(&server, server_latency_ms);

        debug!(
            clock_ms = self.clock_ms,
            live = self.particles.len(),
            removed = self.removed.len(),
            "tick 完成"
        );
    }

    /// 连续运行 `ticks` 个 tick，每个 tick 结束后把状态交给 `sink`
    pub fn run_ticks<R: Rng>(
        &mut self,
        ticks: u64,
        dt_secs: f64,
        bounds: &WorldBounds,
        rng: &mut R,
        sink: &mut dyn FrameSink,
    ) {
        info!(ticks, dt_secs, "▶️  开始运行仿真");
        for _ in 0..ticks {
            self.tick(dt_secs, bounds, rng);
            sink.on_frame(self);
        }
        info!(
            clock_ms = self.clock_ms,
            live = self.particles.len(),
            spawned = self.stats.spawned,
            processed = self.stats.processed,
            "✅ 仿真完成"
        );
    }

    fn spawn_due<R: Rng>(&mut self, bounds: &WorldBounds, rng: &mut R) {
        let clock = self.clock_ms;
        let jitter = self.cfg.spawn_jitter;
        for si in 0..self.sources.len() {
            while let Some(payload_bytes) = self.sources[si].peek_due(clock).map(|e| e.payload_bytes) {
                if self.particles.len() >= self.cfg.max_particles {
                    self.stats.deferred_spawns += 1;
                    trace!(source = si, "达到粒子上限，推迟生成");
                    break;
                }
                let offset = if jitter > 0.0 {
                    Vec2::new(
                        rng.random_range(-jitter..=jitter),
                        rng.random_range(-jitter..=jitter),
                    )
                } else {
                    Vec2::ZERO
                };
                let origin = self.sources[si].origin;
                self.sources[si].mark_fired();
                self.push_particle(origin + offset, Vec2::ZERO, payload_bytes, bounds);
            }
        }
    }

    fn build_index(&self, bounds: &WorldBounds) -> QuadTree<usize> {
        let mut index = QuadTree::new(Rect::from_bounds(bounds), self.cfg.quadtree_capacity);
        for (i, p) in self.particles.iter().enumerate() {
            // 上一 tick 结束时粒子已被钳制在世界内；世界缩小时先钳制再索引
            if !index.insert(p.pos, i) {
                index.insert(bounds.clamp(p.pos), i);
            }
        }
        index
    }

    fn process_intake(&mut self, server: &ServerBoundary, latency_ms: f64) {
        let clock = self.clock_ms;
        for p in &mut self.particles {
            if !p.is_intaken() && server.in_intake(p.pos) {
                p.start_processing_ms = clock;
                p.state = ParticleState::Intaken;
                self.stats.intaken += 1;
                trace!(id = p.id, clock_ms = clock, "进入服务器");
            }
            if p.is_intaken() && clock - p.start_processing_ms >= latency_ms {
                p.state = ParticleState::Removed;
                self.removed.push(p.id);
            }
        }
        if !self.removed.is_empty() {
            self.particles.retain(|p| p.state != ParticleState::Removed);
            self.stats.processed += self.removed.len() as u64;
        }
    }
}
