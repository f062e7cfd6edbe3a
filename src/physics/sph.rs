//! SPH（光滑粒子流体动力学）相互作用
//!
//! 1. 密度：核加权累加（包含自身项）
//! 2. 压强：状态方程，钳制为非负
//! 3. 压力项（spiky 梯度）+ 粘性项（拉普拉斯），按作用/反作用加到粒子对两端；
//!    粘性项按 dt 限幅，一个 tick 内最多把粒子对的相对速度消为零
//! 4. 加速度 = 合力 / 自身密度

use tracing::trace;

use crate::sim::SphParams;
use crate::spatial::QuadTree;

use super::interaction::{Interaction, neighbor_pairs};
use super::kernel::{SphKernel, pressure};
use super::particle::Particle;
use super::vec2::Vec2;

const MIN_SEPARATION: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct SphInteraction {
    params: SphParams,
}

impl SphInteraction {
    pub fn new(params: SphParams) -> Self {
        Self { params }
    }

    pub fn kernel(&self, radius: f64) -> SphKernel {
        SphKernel::new(self.params.smoothing_factor * radius)
    }
}

impl Interaction for SphInteraction {
    fn name(&self) -> &'static str {
        "sph"
    }

    fn range(&self, radius: f64) -> f64 {
        self.params.smoothing_factor * radius
    }

    fn apply(&self, particles: &mut [Particle], index: &QuadTree<usize>, radius: f64, dt: f64) {
        let kernel = self.kernel(radius);
        let m = self.params.particle_mass;
        let pairs = neighbor_pairs(particles, index, self.range(radius));

        let self_density = m * kernel.poly6_at(0.0);
        for p in particles.iter_mut() {
            p.density = self_density;
            p.force = Vec2::ZERO;
        }
        for &(i, j) in &pairs {
            let r2 = (particles[i].pos - particles[j].pos).length_sq();
            let w = m * kernel.poly6_at(r2);
            particles[i].density += w;
            particles[j].density += w;
        }
        for p in particles.iter_mut() {
            p.pressure = pressure(p.density, self.params.gas_constant, self.params.rest_density);
        }

        let mut interacting = 0usize;
        for &(i, j) in &pairs {
            let (pi, pj) = (&particles[i], &particles[j]);
            let r = pi.pos - pj.pos;
            let dist = r.length();
            if dist >= kernel.h {
                continue;
            }
            interacting += 1;

            let mut f = Vec2::ZERO;
            if dist > MIN_SEPARATION {
                let dir = r / dist;
                let mag = -m * (pi.pressure + pj.pressure) / (2.0 * pj.density)
                    * kernel.spiky_grad_at(dist);
                f += dir * mag;
            }
            let visc = self.params.viscosity * m / pj.density * kernel.visc_lap_at(dist);
            let reach = visc * dt * (1.0 / pi.density + 1.0 / pj.density);
            let visc = if reach > 1.0 { visc / reach } else { visc };
            f += (pj.vel - pi.vel) * visc;

            // j 取与 i 等大反向的力（Müller 形式中 j 的份额除以 ρi，这里对称近似为 ρj），
            // 使每对粒子的合力为零
            particles[i].force += f;
            particles[j].force -= f;
        }

        for p in particles.iter_mut() {
            if p.density > 0.0 {
                p.vel += p.force * (dt / p.density);
            }
        }
        trace!(pairs = pairs.len(), interacting, "SPH 力计算");
    }
}
