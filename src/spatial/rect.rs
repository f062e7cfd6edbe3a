//! 轴对齐矩形（中心 + 半宽/半高，闭区间）

use serde::Serialize;

use crate::physics::{Vec2, WorldBounds};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub cx: f64,
    pub cy: f64,
    pub hw: f64,
    pub hh: f64,
}

impl Rect {
    pub fn new(cx: f64, cy: f64, hw: f64, hh: f64) -> Self {
        Self { cx, cy, hw, hh }
    }

    /// 以 `c` 为中心、半边长为 `half` 的正方形
    pub fn square(c: Vec2, half: f64) -> Self {
        Self::new(c.x, c.y, half, half)
    }

    pub fn from_bounds(b: &WorldBounds) -> Self {
        let c = b.center();
        Self::new(c.x, c.y, b.width() / 2.0, b.height() / 2.0)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.cx - self.hw
            && p.x <= self.cx + self.hw
            && p.y >= self.cy - self.hh
            && p.y <= self.cy + self.hh
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !(other.cx - other.hw > self.cx + self.hw
            || other.cx + other.hw < self.cx - self.hw
            || other.cy - other.hh > self.cy + self.hh
            || other.cy + other.hh < self.cy - self.hh)
    }

    /// 四个等分象限：NE, NW, SW, SE
    pub fn quadrants(&self) -> [Rect; 4] {
        let hw = self.hw / 2.0;
        let hh = self.hh / 2.0;
        [
            Rect::new(self.cx + hw, self.cy + hh, hw, hh),
            Rect::new(self.cx - hw, self.cy + hh, hw, hh),
            Rect::new(self.cx - hw, self.cy - hh, hw, hh),
            Rect::new(self.cx + hw, self.cy - hh, hw, hh),
        ]
    }
}
