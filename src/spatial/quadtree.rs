//! 四叉树
//!
//! 每个 tick 从零重建的一次性加速结构，只支持插入与范围查询，不支持删除。

use crate::physics::Vec2;

use super::rect::Rect;

pub const DEFAULT_CAPACITY: usize = 4;
/// 超过该深度不再细分，重合点直接留在节点里
pub const MAX_DEPTH: u32 = 16;

#[derive(Debug, Clone)]
pub struct QuadTree<T> {
    boundary: Rect,
    capacity: usize,
    depth: u32,
    items: Vec<(Vec2, T)>,
    children: Option<Box<[QuadTree<T>; 4]>>,
}

impl<T: Copy> QuadTree<T> {
    pub fn new(boundary: Rect, capacity: usize) -> Self {
        Self::with_depth(boundary, capacity.max(1), 0)
    }

    fn with_depth(boundary: Rect, capacity: usize, depth: u32) -> Self {
        Self {
            boundary,
            capacity,
            depth,
            items: Vec::with_capacity(capacity),
            children: None,
        }
    }

    pub fn boundary(&self) -> &Rect {
        &self.boundary
    }

    pub fn is_divided(&self) -> bool {
        self.children.is_some()
    }

    /// 插入；点在边界外时返回 false
    pub fn insert(&mut self, pos: Vec2, item: T) -> bool {
        if !self.boundary.contains(pos) {
            return false;
        }
        if self.items.len() < self.capacity || self.depth >= MAX_DEPTH {
            self.items.push((pos, item));
            return true;
        }
        let depth = self.depth + 1;
        let capacity = self.capacity;
        let children = self.children.get_or_insert_with(|| {
            let [ne, nw, sw, se] = self.boundary.quadrants();
            Box::new([
                QuadTree::with_depth(ne, capacity, depth),
                QuadTree::with_depth(nw, capacity, depth),
                QuadTree::with_depth(sw, capacity, depth),
                QuadTree::with_depth(se, capacity, depth),
            ])
        });
        if children.iter_mut().any(|c| c.insert(pos, item)) {
            return true;
        }
        // 浮点舍入导致子象限都不接收时，留在本节点
        self.items.push((pos, item));
        true
    }

    /// 返回落在 `range` 内的所有条目
    pub fn query(&self, range: &Rect) -> Vec<T> {
        let mut out = Vec::new();
        self.query_into(range, &mut out);
        out
    }

    /// 与 `range` 不相交的节点整棵跳过
    pub fn query_into(&self, range: &Rect, out: &mut Vec<T>) {
        if !self.boundary.intersects(range) {
            return;
        }
        out.extend(
            self.items
                .iter()
                .filter(|(p, _)| range.contains(*p))
                .map(|(_, item)| *item),
        );
        if let Some(children) = &self.children {
            for c in children.iter() {
                c.query_into(range, out);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
            + self
                .children
                .as_ref()
                .map_or(0, |cs| cs.iter().map(|c| c.len()).sum())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
