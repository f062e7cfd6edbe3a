//! 服务器边界
//!
//! 世界底部中央的漏斗：两条二次贝塞尔曲线从左右墙的"沿口"弯向中间的"颈口"，
//! 颈口宽度即服务器容量 `server_capacity_width`。穿过颈口进入下方的入口区即被"接收"。
//!
//! 碰撞检测按固定细分数把曲线离散成线段，逐段做粒子-线段相交测试。

use serde::Serialize;

use super::bounds::WorldBounds;
use super::particle::Particle;
use super::vec2::Vec2;

/// 每条曲线的细分段数
pub const SERVER_CURVE_SEGMENTS: usize = 16;
/// 颈口高度（占世界高度的比例，自底部起算）
pub const NECK_HEIGHT_FRAC: f64 = 0.25;
/// 沿口高度（占世界高度的比例，自底部起算）
pub const RIM_HEIGHT_FRAC: f64 = 0.55;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        let ab = self.b - self.a;
        let len_sq = ab.length_sq();
        if len_sq == 0.0 {
            return self.a;
        }
        let t = ((p - self.a).dot(ab) / len_sq).clamp(0.0, 1.0);
        self.a + ab * t
    }

    /// 线段左法线（单位向量）
    pub fn normal(&self) -> Vec2 {
        let ab = self.b - self.a;
        Vec2::new(-ab.y, ab.x).normalized()
    }
}

fn quad_bezier(p0: Vec2, p1: Vec2, p2: Vec2, t: f64) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

#[derive(Debug, Clone)]
pub struct ServerBoundary {
    center_x: f64,
    half_width: f64,
    neck_y: f64,
    segments: Vec<Segment>,
}

impl ServerBoundary {
    pub fn new(bounds: &WorldBounds, capacity_width: f64) -> Self {
        let center_x = bounds.center().x;
        let half_width = (capacity_width.max(0.0) / 2.0).min(bounds.width() / 2.0);
        let neck_y = bounds.bottom + NECK_HEIGHT_FRAC * bounds.height();
        let rim_y = bounds.bottom + RIM_HEIGHT_FRAC * bounds.height();

        let left = [
            Vec2::new(bounds.left, rim_y),
            Vec2::new(center_x - half_width, rim_y),
            Vec2::new(center_x - half_width, neck_y),
        ];
        let right = [
            Vec2::new(bounds.right, rim_y),
            Vec2::new(center_x + half_width, rim_y),
            Vec2::new(center_x + half_width, neck_y),
        ];

        let mut segments = Vec::with_capacity(2 * SERVER_CURVE_SEGMENTS);
        for [p0, p1, p2] in [left, right] {
            let mut prev = p0;
            for k in 1..=SERVER_CURVE_SEGMENTS {
                let t = k as f64 / SERVER_CURVE_SEGMENTS as f64;
                let next = quad_bezier(p0, p1, p2, t);
                segments.push(Segment { a: prev, b: next });
                prev = next;
            }
        }

        Self {
            center_x,
            half_width,
            neck_y,
            segments,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn neck_y(&self) -> f64 {
        self.neck_y
    }

    /// 入口区：颈口正下方
    pub fn in_intake(&self, p: Vec2) -> bool {
        p.y <= self.neck_y && (p.x - self.center_x).abs() <= self.half_width
    }

    /// 粒子与漏斗壁碰撞：反射并衰减法向速度，再把粒子推出穿透区。
    pub fn collide(&self, p: &mut Particle, radius: f64, damping: f64) -> bool {
        let mut hit = false;
        for seg in &self.segments {
            let c = seg.closest_point(p.pos);
            let delta = p.pos - c;
            let d2 = delta.length_sq();
            if d2 >= radius * radius {
                continue;
            }
            let d = d2.sqrt();
            let n = if d > 0.0 { delta / d } else { seg.normal() };
            let vn = p.vel.dot(n);
            if vn < 0.0 {
                p.vel -= n * (vn * (1.0 + damping));
            }
            p.pos = c + n * radius;
            hit = true;
        }
        hit
    }
}
