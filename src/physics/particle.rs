//! 粒子
//!
//! 每个粒子对应一个被调度到达的数据包。

use serde::Serialize;

use super::vec2::Vec2;

/// 粒子生命周期：`Spawned -> InFlight -> Intaken -> Removed`，不可逆。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleState {
    /// 本 tick 刚生成，尚未积分
    Spawned,
    InFlight,
    /// 已进入服务器入口，正在"处理"
    Intaken,
    Removed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: u64,
    pub pos: Vec2,
    pub vel: Vec2,
    pub density: f64,
    pub pressure: f64,
    /// 本 tick 累计的相互作用力
    pub force: Vec2,
    /// 进入服务器入口的时钟（毫秒）；未进入时为正无穷
    pub start_processing_ms: f64,
    pub payload_bytes: u32,
    pub state: ParticleState,
}

impl Particle {
    pub fn new(id: u64, pos: Vec2, vel: Vec2, payload_bytes: u32) -> Self {
        Self {
            id,
            pos,
            vel,
            density: 0.0,
            pressure: 0.0,
            force: Vec2::ZERO,
            start_processing_ms: f64::INFINITY,
            payload_bytes,
            state: ParticleState::Spawned,
        }
    }

    pub fn is_intaken(&self) -> bool {
        self.start_processing_ms.is_finite()
    }

    /// 速度上限
    pub fn cap_speed(&mut self, max_speed: f64) {
        let sq = self.vel.length_sq();
        if sq > max_speed * max_speed {
            self.vel = self.vel * (max_speed / sq.sqrt());
        }
    }
}
