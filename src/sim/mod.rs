//! 仿真核心模块
//!
//! 此模块包含离散时间粒子仿真的核心组件：配置、粒子源、仿真器与帧接收端。

// 子模块声明
mod config;
mod frame;
mod simulator;
mod source;
mod stats;

// 重新导出公共接口
pub use config::{ConfigError, ElasticParams, ForceModel, SimConfig, SimOptions, SphParams};
pub use frame::{FrameSink, NullSink};
pub use simulator::ParticleSimulator;
pub use source::{ParticleSource, SpawnEntry};
pub use stats::SimStats;
