//! Static quadtree over axis-aligned rectangles.
//!
//! The tree recursively splits the simulation bounds into four quadrants up
//! to a fixed depth. An item descends only while some quadrant *strictly*
//! contains its rectangle, so large or boundary-straddling items come to
//! rest at an inner node instead of being duplicated — every item lives at
//! exactly one node.
//!
//! Nodes live in an arena (`Vec<QuadNode>`) and refer to each other by
//! index; the parent link is a plain index, never used to manage lifetime.
//! There is no incremental relocation: the per-frame update is a full
//! `clear` + reinsert, trading O(N log N) work for zero stale-node
//! bookkeeping.
//!
//! The tree is generic over the stored reference type `T` so the same
//! container works for body ids, slot indices or anything else `Copy`.

use crate::simulation::geometry::Rect;

/// Nodes below this depth never subdivide further.
pub const MAX_DEPTH: usize = 7;

#[derive(Debug)]
struct QuadNode<T> {
    rect: Rect,
    child_rects: [Rect; 4],
    children: [Option<usize>; 4],
    parent: Option<usize>,
    depth: usize,
    items: Vec<(Rect, T)>,
}

impl<T> QuadNode<T> {
    fn new(rect: Rect, depth: usize, parent: Option<usize>) -> Self {
        Self {
            rect,
            child_rects: rect.quadrants(),
            children: [None; 4],
            parent,
            depth,
            items: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct QuadTree<T> {
    nodes: Vec<QuadNode<T>>,
}

impl<T: Copy> QuadTree<T> {
    /// Root covers the full simulation bounds.
    pub fn new(bounds: Rect) -> Self {
        Self {
            nodes: vec![QuadNode::new(bounds, 0, None)],
        }
    }

    pub fn bounds(&self) -> Rect {
        self.nodes[0].rect
    }

    /// Drops every item and every node except the root.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[0].children = [None; 4];
        self.nodes[0].items.clear();
    }

    /// Total number of stored items.
    pub fn size(&self) -> usize {
        self.nodes.iter().map(|n| n.items.len()).sum()
    }

    pub fn insert(&mut self, item: T, item_rect: Rect) {
        self.insert_at(0, item, item_rect);
    }

    fn insert_at(&mut self, node: usize, item: T, item_rect: Rect) {
        for quadrant in 0..4 {
            if self.nodes[node].child_rects[quadrant].contains_strict(&item_rect)
                && self.nodes[node].depth + 1 < MAX_DEPTH
            {
                let child = match self.nodes[node].children[quadrant] {
                    Some(idx) => idx,
                    None => {
                        let rect = self.nodes[node].child_rects[quadrant];
                        let depth = self.nodes[node].depth + 1;
                        let idx = self.nodes.len();
                        self.nodes.push(QuadNode::new(rect, depth, Some(node)));
                        self.nodes[node].children[quadrant] = Some(idx);
                        idx
                    }
                };
                self.insert_at(child, item, item_rect);
                return;
            }
        }

        // No quadrant strictly contains the item, or the depth limit was
        // reached: it belongs to this node.
        self.nodes[node].items.push((item_rect, item));
    }

    /// All items whose rectangle intersects `area` (inclusive bounds).
    pub fn search(&self, area: Rect) -> Vec<T> {
        let mut found = Vec::new();
        self.search_node(0, &area, &mut found);
        found
    }

    fn search_node(&self, node: usize, area: &Rect, found: &mut Vec<T>) {
        for (rect, item) in &self.nodes[node].items {
            if area.overlaps(rect) {
                found.push(*item);
            }
        }

        for quadrant in 0..4 {
            if let Some(child) = self.nodes[node].children[quadrant] {
                if area.contains_strict(&self.nodes[node].child_rects[quadrant]) {
                    // The query swallows this quadrant whole; no need to
                    // test its items one by one.
                    self.collect_subtree(child, found);
                } else if self.nodes[node].child_rects[quadrant].overlaps(area) {
                    self.search_node(child, area, found);
                }
            }
        }
    }

    fn collect_subtree(&self, node: usize, found: &mut Vec<T>) {
        for (_, item) in &self.nodes[node].items {
            found.push(*item);
        }
        for child in self.nodes[node].children.into_iter().flatten() {
            self.collect_subtree(child, found);
        }
    }

    /// Rectangles of every live node, for debug-geometry drawing.
    pub fn node_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.nodes.iter().map(|n| n.rect)
    }

    /// Rectangle of a node's parent; the root counts as its own parent.
    pub fn parent_rect(&self, node: usize) -> Rect {
        match self.nodes[node].parent {
            Some(p) => self.nodes[p].rect,
            None => self.nodes[node].rect,
        }
    }

    /// Estimated bytes held by the node arena and its item lists.
    pub fn byte_size(&self) -> usize {
        let mut count = self.nodes.len() * std::mem::size_of::<QuadNode<T>>();
        for node in &self.nodes {
            count += node.items.capacity() * std::mem::size_of::<(Rect, T)>();
        }
        count
    }

    #[cfg(test)]
    fn depth_of_item(&self, wanted: T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.nodes
            .iter()
            .find(|n| n.items.iter().any(|(_, item)| *item == wanted))
            .map(|n| n.depth)
    }

    #[cfg(test)]
    fn parent_links_consistent(&self) -> bool {
        self.nodes.iter().enumerate().all(|(idx, node)| {
            node.children
                .iter()
                .flatten()
                .all(|&c| self.nodes[c].parent == Some(idx))
        })
    }
}
