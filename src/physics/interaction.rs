//! 粒子间相互作用模型
//!
//! 同一个仿真只使用一种模型（SPH 或弹性碰撞），构造时根据配置选定。

use crate::sim::ForceModel;
use crate::spatial::{QuadTree, Rect};

use super::elastic::ElasticInteraction;
use super::particle::Particle;
use super::sph::SphInteraction;

/// 相互作用模型抽象
pub trait Interaction: std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// 邻域查询的半边长（粒子半径的小倍数）
    fn range(&self, radius: f64) -> f64;

    /// 解析所有邻近粒子对，直接更新速度。
    ///
    /// `index` 的条目是 `particles` 的下标，每个无序粒子对只处理一次。
    fn apply(&self, particles: &mut [Particle], index: &QuadTree<usize>, radius: f64, dt: f64);
}

/// 根据配置构造模型
pub fn build_interaction(model: &ForceModel) -> Box<dyn Interaction> {
    match model {
        ForceModel::Sph(params) => Box::new(SphInteraction::new(params.clone())),
        ForceModel::Elastic(params) => Box::new(ElasticInteraction::new(params.clone())),
    }
}

/// 通过四叉树正方形查询收集候选粒子对 `(i, j)`，保证 `i < j`
pub fn neighbor_pairs(particles: &[Particle], index: &QuadTree<usize>, range: f64) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    let mut found = Vec::new();
    for (i, p) in particles.iter().enumerate() {
        found.clear();
        index.query_into(&Rect::square(p.pos, range), &mut found);
        found.sort_unstable();
        pairs.extend(found.iter().filter(|&&j| j > i).map(|&j| (i, j)));
    }
    pairs
}
