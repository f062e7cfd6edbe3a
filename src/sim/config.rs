//! 仿真配置
//!
//! `SimConfig` 可从 JSON 读取，缺省字段取默认值；CLI 参数可再覆盖。

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

fn require(cond: bool, msg: &str) -> Result<(), ConfigError> {
    if cond {
        Ok(())
    } else {
        Err(ConfigError::InvalidParam(msg.to_string()))
    }
}

fn finite_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn unit_interval(v: f64) -> bool {
    (0.0..=1.0).contains(&v)
}

/// 运行期可调的选项，下一个 tick 生效
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimOptions {
    /// 粒子半径缩放（> 0）
    pub particle_radius_scale: f64,
    /// 服务器颈口宽度（≥ 0）
    pub server_capacity_width: f64,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            particle_radius_scale: 1.0,
            server_capacity_width: 10.0,
        }
    }
}

impl SimOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require(
            finite_positive(self.particle_radius_scale),
            "particle_radius_scale must be finite and > 0",
        )?;
        require(
            self.server_capacity_width.is_finite() && self.server_capacity_width >= 0.0,
            "server_capacity_width must be finite and >= 0",
        )
    }
}

/// SPH 参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphParams {
    /// 平滑半径 h = smoothing_factor * 粒子半径
    pub smoothing_factor: f64,
    pub particle_mass: f64,
    /// 状态方程刚度 k
    pub gas_constant: f64,
    /// 静止密度 ρ0；默认值接近半径 1、间距 2 的紧密堆积密度
    pub rest_density: f64,
    /// 粘性系数 μ
    pub viscosity: f64,
}

impl Default for SphParams {
    fn default() -> Self {
        Self {
            smoothing_factor: 4.0,
            particle_mass: 1.0,
            gas_constant: 2_000.0,
            rest_density: 0.08,
            viscosity: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticParams {
    /// 恢复系数 e ∈ [0, 1]
    pub restitution: f64,
}

impl Default for ElasticParams {
    fn default() -> Self {
        Self { restitution: 0.9 }
    }
}

/// 粒子间相互作用模型（一个仿真只用一种）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForceModel {
    Sph(SphParams),
    Elastic(ElasticParams),
}

impl Default for ForceModel {
    fn default() -> Self {
        ForceModel::Sph(SphParams::default())
    }
}

impl ForceModel {
    /// 序列化时的 `kind` 标签
    pub fn kind(&self) -> &'static str {
        match self {
            ForceModel::Sph(_) => "sph",
            ForceModel::Elastic(_) => "elastic",
        }
    }

    /// 切换到 `kind` 对应的模型；与当前相同则原样保留参数，否则取新模型的默认参数
    pub fn with_kind(self, kind: &str) -> Result<Self, ConfigError> {
        let kind = kind.trim().to_ascii_lowercase();
        if kind == self.kind() {
            return Ok(self);
        }
        match kind.as_str() {
            "sph" => Ok(ForceModel::Sph(SphParams::default())),
            "elastic" => Ok(ForceModel::Elastic(ElasticParams::default())),
            other => Err(ConfigError::InvalidParam(format!(
                "unknown force model '{other}', expected sph or elastic"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub max_particles: usize,
    /// 基础粒子半径（乘以 `particle_radius_scale`）
    pub particle_radius: f64,
    /// 重力加速度（单位/秒²）
    pub gravity: [f64; 2],
    pub wall_damping: f64,
    pub server_damping: f64,
    /// 服务器处理时延（毫秒）
    pub server_latency_ms: f64,
    /// 生成位置抖动（±）
    pub spawn_jitter: f64,
    pub max_speed: f64,
    /// 源位置；超出世界边界时生成位置会被钳制
    pub source_origin: [f64; 2],
    pub quadtree_capacity: usize,
    pub force_model: ForceModel,
    pub options: SimOptions,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_particles: 2_000,
            particle_radius: 1.0,
            gravity: [0.0, -30.0],
            wall_damping: 0.5,
            server_damping: 0.4,
            server_latency_ms: 250.0,
            spawn_jitter: 0.5,
            max_speed: 200.0,
            source_origin: [0.0, 45.0],
            quadtree_capacity: crate::spatial::DEFAULT_CAPACITY,
            force_model: ForceModel::default(),
            options: SimOptions::default(),
        }
    }
}

impl SimConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let cfg: SimConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require(self.max_particles > 0, "max_particles must be > 0")?;
        require(
            finite_positive(self.particle_radius),
            "particle_radius must be finite and > 0",
        )?;
        require(
            self.gravity.iter().all(|g| g.is_finite()),
            "gravity must be finite",
        )?;
        require(
            unit_interval(self.wall_damping),
            "wall_damping must be in [0, 1]",
        )?;
        require(
            unit_interval(self.server_damping),
            "server_damping must be in [0, 1]",
        )?;
        require(
            self.server_latency_ms.is_finite() && self.server_latency_ms >= 0.0,
            "server_latency_ms must be finite and >= 0",
        )?;
        require(
            self.spawn_jitter.is_finite() && self.spawn_jitter >= 0.0,
            "spawn_jitter must be finite and >= 0",
        )?;
        require(finite_positive(self.max_speed), "max_speed must be finite and > 0")?;
        require(
            self.source_origin.iter().all(|v| v.is_finite()),
            "source_origin must be finite",
        )?;
        require(self.quadtree_capacity > 0, "quadtree_capacity must be > 0")?;
        match &self.force_model {
            ForceModel::Sph(p) => {
                require(
                    finite_positive(p.smoothing_factor),
                    "sph.smoothing_factor must be finite and > 0",
                )?;
                require(
                    finite_positive(p.particle_mass),
                    "sph.particle_mass must be finite and > 0",
                )?;
                require(
                    p.gas_constant.is_finite() && p.gas_constant >= 0.0,
                    "sph.gas_constant must be finite and >= 0",
                )?;
                require(
                    p.rest_density.is_finite() && p.rest_density >= 0.0,
                    "sph.rest_density must be finite and >= 0",
                )?;
                require(
                    p.viscosity.is_finite() && p.viscosity >= 0.0,
                    "sph.viscosity must be finite and >= 0",
                )?;
            }
            ForceModel::Elastic(p) => {
                require(
                    unit_interval(p.restitution),
                    "elastic.restitution must be in [0, 1]",
                )?;
            }
        }
        self.options.validate()
    }
}
