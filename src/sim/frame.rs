//! 帧接收端
//!
//! 渲染端的替身：每个 tick 在 `step()` 返回之后读取粒子位置，不影响仿真结果。

use super::simulator::ParticleSimulator;

pub trait FrameSink {
    fn on_frame(&mut self, sim: &ParticleSimulator);
}

/// 丢弃所有帧
#[derive(Debug, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn on_frame(&mut self, _sim: &ParticleSimulator) {}
}
