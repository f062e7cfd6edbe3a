//! 统计信息

use serde::Serialize;

/// 仿真统计
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SimStats {
    pub ticks: u64,
    pub spawned: u64,
    pub intaken: u64,
    /// 处理完毕并移除的粒子数
    pub processed: u64,
    /// 因达到粒子上限而推迟的生成次数（按 tick 计）
    pub deferred_spawns: u64,
    pub peak_live: usize,
}
