//! 粒子物理模块
//!
//! 粒子状态、世界边界、墙壁与服务器漏斗碰撞，以及两种粒子间相互作用模型。

mod bounds;
mod elastic;
mod interaction;
mod kernel;
mod particle;
mod server;
mod sph;
mod vec2;
mod wall;

pub use bounds::WorldBounds;
pub use elastic::ElasticInteraction;
pub use interaction::{Interaction, build_interaction, neighbor_pairs};
pub use kernel::{SphKernel, pressure};
pub use particle::{Particle, ParticleState};
pub use server::{
    NECK_HEIGHT_FRAC, RIM_HEIGHT_FRAC, SERVER_CURVE_SEGMENTS, Segment, ServerBoundary,
};
pub use sph::SphInteraction;
pub use vec2::Vec2;
pub use wall::resolve_walls;
