//! 空间索引
//!
//! 邻居查询用的四叉树，按 tick 全量重建。

mod quadtree;
mod rect;

pub use quadtree::{DEFAULT_CAPACITY, MAX_DEPTH, QuadTree};
pub use rect::Rect;
