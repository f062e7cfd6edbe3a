//! 可视化事件记录（用于离线回放）
//!
//! 设计目标：
//! - **结构化**：用 JSON 事件而不是解析文本日志
//! - **只读**：记录发生在 `step()` 返回之后，不影响仿真结果
//! - **可回放**：第一条为 meta（世界边界与漏斗几何），之后逐 tick 的粒子帧

mod types;

pub use types::{VizEvent, VizEventKind, VizLogger, VizParticle};
