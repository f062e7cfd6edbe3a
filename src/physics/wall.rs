//! 墙壁碰撞
//!
//! 穿透时反射并衰减该速度分量，然后把位置精确钳制到边界上。

use super::bounds::WorldBounds;
use super::particle::Particle;

/// 返回是否发生了碰撞
pub fn resolve_walls(p: &mut Particle, bounds: &WorldBounds, damping: f64) -> bool {
    let mut hit = false;
    if p.pos.x < bounds.left {
        p.pos.x = bounds.left;
        if p.vel.x < 0.0 {
            p.vel.x = -p.vel.x * damping;
        }
        hit = true;
    } else if p.pos.x > bounds.right {
        p.pos.x = bounds.right;
        if p.vel.x > 0.0 {
            p.vel.x = -p.vel.x * damping;
        }
        hit = true;
    }
    if p.pos.y < bounds.bottom {
        p.pos.y = bounds.bottom;
        if p.vel.y < 0.0 {
            p.vel.y = -p.vel.y * damping;
        }
        hit = true;
    } else if p.pos.y > bounds.top {
        p.pos.y = bounds.top;
        if p.vel.y > 0.0 {
            p.vel.y = -p.vel.y * damping;
        }
        hit = true;
    }
    hit
}
