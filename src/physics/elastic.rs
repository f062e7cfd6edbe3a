//! 弹性碰撞相互作用
//!
//! 两粒子中心距小于半径之和且沿连心线相互接近时，沿接触法线施加冲量
//! J = (1 + e) v_rel / 2（等质量），两粒子速度反向更新，动量精确守恒。

use tracing::trace;

use crate::sim::ElasticParams;
use crate::spatial::QuadTree;

use super::interaction::{Interaction, neighbor_pairs};
use super::particle::Particle;

#[derive(Debug, Clone)]
pub struct ElasticInteraction {
    params: ElasticParams,
}

impl ElasticInteraction {
    pub fn new(params: ElasticParams) -> Self {
        Self { params }
    }
}

impl Interaction for ElasticInteraction {
    fn name(&self) -> &'static str {
        "elastic"
    }

    fn range(&self, radius: f64) -> f64 {
        2.0 * radius
    }

    fn apply(&self, particles: &mut [Particle], index: &QuadTree<usize>, radius: f64, _dt: f64) {
        let contact = self.range(radius);
        let mut collisions = 0usize;
        for (i, j) in neighbor_pairs(particles, index, contact) {
            let delta = particles[j].pos - particles[i].pos;
            let d2 = delta.length_sq();
            if d2 >= contact * contact || d2 == 0.0 {
                continue;
            }
            let n = delta / d2.sqrt();
            let v_rel = (particles[i].vel - particles[j].vel).dot(n);
            if v_rel <= 0.0 {
                continue;
            }
            let impulse = n * ((1.0 + self.params.restitution) * v_rel / 2.0);
            particles[i].vel -= impulse;
            particles[j].vel += impulse;
            collisions += 1;
        }
        trace!(collisions, "弹性碰撞");
    }
}
