//! 粒子源
//!
//! 由抓包记录的时间戳生成按时间排序的生成队列。队列构造后顺序与长度不变，
//! 只有 `fired` 标志会被置位（显式 restart 时复位）。

use serde::Serialize;
use tracing::debug;

use crate::capture::CaptureFile;
use crate::physics::Vec2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpawnEntry {
    /// 相对第一条合格记录的触发时间（毫秒）
    pub fire_at_ms: f64,
    pub payload_bytes: u32,
    pub fired: bool,
}

#[derive(Debug, Clone)]
pub struct ParticleSource {
    pub origin: Vec2,
    queue: Vec<SpawnEntry>,
    /// 第一个未触发条目的下标；已触发条目总是队列前缀
    next: usize,
}

impl ParticleSource {
    /// `(fire_at_ms, payload_bytes)` 按触发时间稳定排序
    pub fn new(origin: Vec2, entries: impl IntoIterator<Item = (f64, u32)>) -> Self {
        let mut queue: Vec<SpawnEntry> = entries
            .into_iter()
            .map(|(fire_at_ms, payload_bytes)| SpawnEntry {
                fire_at_ms,
                payload_bytes,
                fired: false,
            })
            .collect();
        queue.sort_by(|a, b| a.fire_at_ms.total_cmp(&b.fire_at_ms));
        Self {
            origin,
            queue,
            next: 0,
        }
    }

    /// 只取能分类到传输层的记录；时间以第一条合格记录为零点
    pub fn from_capture(capture: &CaptureFile, origin: Vec2) -> Self {
        let mut qualifying = capture
            .records
            .iter()
            .filter_map(|r| r.transport().map(|seg| (r.timestamp_us(), seg.payload().len())))
            .peekable();
        let t0 = qualifying.peek().map(|(t, _)| *t).unwrap_or(0);
        let entries: Vec<(f64, u32)> = qualifying
            .map(|(t, len)| ((t - t0) as f64 / 1_000.0, len as u32))
            .collect();
        debug!(
            records = capture.records.len(),
            scheduled = entries.len(),
            "由抓包构造生成队列"
        );
        Self::new(origin, entries)
    }

    pub fn queue(&self) -> &[SpawnEntry] {
        &self.queue
    }

    pub fn fire_times(&self) -> Vec<f64> {
        self.queue.iter().map(|e| e.fire_at_ms).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// 尚未触发的条目数
    pub fn pending(&self) -> usize {
        self.queue.len() - self.next
    }

    /// 下一个到期（`fire_at_ms <= clock_ms`）且未触发的条目
    pub(crate) fn peek_due(&self, clock_ms: f64) -> Option<&SpawnEntry> {
        self.queue
            .get(self.next)
            .filter(|e| !e.fired && e.fire_at_ms <= clock_ms)
    }

    /// 把 `peek_due` 返回的条目标记为已触发
    pub(crate) fn mark_fired(&mut self) {
        if let Some(e) = self.queue.get_mut(self.next) {
            e.fired = true;
            self.next += 1;
        }
    }

    /// 复位所有 `fired` 标志
    pub fn reset(&mut self) {
        for e in &mut self.queue {
            e.fired = false;
        }
        self.next = 0;
    }
}
