//! 世界边界
//!
//! 渲染端每个 tick 提供的矩形区域；y 轴向上（bottom < top）。

use serde::{Deserialize, Serialize};

use crate::sim::ConfigError;

use super::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            left: -50.0,
            right: 50.0,
            bottom: -50.0,
            top: 50.0,
        }
    }
}

impl WorldBounds {
    pub fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// 四个值都必须有限，且 `left <= right`、`bottom <= top`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let all_finite = [self.left, self.right, self.bottom, self.top]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(ConfigError::InvalidParam(format!(
                "world bounds must be finite, got {self:?}"
            )));
        }
        if self.left > self.right || self.bottom > self.top {
            return Err(ConfigError::InvalidParam(format!(
                "world bounds are inverted (left={}, right={}, bottom={}, top={})",
                self.left, self.right, self.bottom, self.top
            )));
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) / 2.0,
            (self.bottom + self.top) / 2.0,
        )
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.bottom && p.y <= self.top
    }

    /// 把点钳制到边界内；边界无效时不会 panic（先取下界再取上界）
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.max(self.left).min(self.right),
            p.y.max(self.bottom).min(self.top),
        )
    }
}
