//! Bounding-volume hierarchy over per-body AABBs.
//!
//! A binary tree stored as a flat node array (no pointers): an internal
//! node's children always sit at `left_child` and `left_child + 1`, and the
//! boxes under any subtree occupy one contiguous range of the box array,
//! maintained by in-place partitioning during the build.
//!
//! Construction splits on the longer axis at the midpoint of the node's
//! extent (a spatial median, not a statistical median of box centers) and
//! stops at two boxes per leaf or when a split leaves one side empty.
//!
//! The collision traversal tests pairs inside each leaf only; boxes that
//! are spatially adjacent but landed in different leaves are not paired.
//! That leaf-local behavior is part of this index's contract.

use crate::simulation::geometry::Aabb;
use crate::simulation::states::{BodyId, NVec2, World};

/// One body's box plus the id it mirrors.
#[derive(Debug, Clone, Copy)]
pub struct IndexedBox {
    pub id: BodyId,
    pub aabb: Aabb,
}

#[derive(Debug, Clone, Copy)]
pub struct BvhNode {
    pub aabb_min: NVec2,
    pub aabb_max: NVec2,
    pub left_child: usize,
    pub first_box: usize,
    pub box_count: usize,
}

impl BvhNode {
    pub fn is_leaf(&self) -> bool {
        self.box_count > 0
    }
}

impl Default for BvhNode {
    fn default() -> Self {
        Self {
            aabb_min: NVec2::zeros(),
            aabb_max: NVec2::zeros(),
            left_child: 0,
            first_box: 0,
            box_count: 0,
        }
    }
}

#[derive(Debug, Default)]
pub struct BvhIndex {
    boxes: Vec<IndexedBox>,
    nodes: Vec<BvhNode>,
    nodes_used: usize,
}

impl BvhIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.boxes.clear();
        self.nodes.clear();
        self.nodes_used = 0;
    }

    /// Rebuild from scratch over the current body positions. There is no
    /// incremental refit; the node array is resized to the `2 × bodyCount`
    /// upper bound for a binary tree over N leaves.
    pub fn build(&mut self, world: &World) {
        self.boxes.clear();
        self.boxes.extend(world.bodies().iter().map(|b| IndexedBox {
            id: b.id,
            aabb: b.aabb(),
        }));

        self.nodes.clear();
        if self.boxes.is_empty() {
            self.nodes_used = 0;
            return;
        }
        self.nodes.resize(2 * self.boxes.len(), BvhNode::default());
        self.nodes_used = 1;

        let root = &mut self.nodes[0];
        root.left_child = 0;
        root.first_box = 0;
        root.box_count = self.boxes.len();
        self.update_node_bounds(0);
        self.subdivide(0);
    }

    /// Tight AABB over the node's box range (min/max reduction).
    fn update_node_bounds(&mut self, node_idx: usize) {
        let mut bounds = Aabb::empty();
        let node = self.nodes[node_idx];
        for boxed in &self.boxes[node.first_box..node.first_box + node.box_count] {
            bounds.grow(&boxed.aabb);
        }
        self.nodes[node_idx].aabb_min = bounds.min;
        self.nodes[node_idx].aabb_max = bounds.max;
    }

    fn subdivide(&mut self, node_idx: usize) {
        let node = self.nodes[node_idx];
        if node.box_count <= 2 {
            return;
        }

        // Split plane: longer axis, midpoint of the extent.
        let extent = node.aabb_max - node.aabb_min;
        let axis = usize::from(extent.y > extent.x);
        let split_pos = node.aabb_min[axis] + extent[axis] * 0.5;

        // Two-pointer in-place partition of the node's box range.
        let mut i = node.first_box;
        let mut j = node.first_box + node.box_count - 1;
        while i <= j {
            if self.boxes[i].aabb.center()[axis] < split_pos {
                i += 1;
            } else {
                self.boxes.swap(i, j);
                if j == 0 {
                    break;
                }
                j -= 1;
            }
        }

        let left_count = i - node.first_box;
        if left_count == 0 || left_count == node.box_count {
            // Degenerate split: keep this node as a (large) leaf.
            return;
        }

        let left = self.nodes_used;
        let right = self.nodes_used + 1;
        self.nodes_used += 2;

        self.nodes[left].first_box = node.first_box;
        self.nodes[left].box_count = left_count;
        self.nodes[right].first_box = i;
        self.nodes[right].box_count = node.box_count - left_count;

        self.nodes[node_idx].left_child = left;
        self.nodes[node_idx].box_count = 0;

        self.update_node_bounds(left);
        self.update_node_bounds(right);
        self.subdivide(left);
        self.subdivide(right);
    }

    /// Per-frame refresh. The BVH has no incremental refit path; this is
    /// the same full rebuild as `build`.
    pub fn update(&mut self, world: &World) {
        self.build(world);
    }

    /// Id pairs whose AABBs overlap, collected leaf by leaf.
    pub fn detect_collisions(&self) -> Vec<(BodyId, BodyId)> {
        let mut collisions = Vec::new();
        if self.nodes_used > 0 {
            self.traverse(0, &mut collisions);
        }
        collisions
    }

    fn traverse(&self, node_idx: usize, collisions: &mut Vec<(BodyId, BodyId)>) {
        let node = &self.nodes[node_idx];
        if node.is_leaf() {
            let first = node.first_box;
            let last = first + node.box_count;
            for i in first..last {
                for j in (i + 1)..last {
                    if self.boxes[i].aabb.overlaps(&self.boxes[j].aabb) {
                        collisions.push((self.boxes[i].id, self.boxes[j].id));
                    }
                }
            }
        } else {
            self.traverse(node.left_child, collisions);
            self.traverse(node.left_child + 1, collisions);
        }
    }

    /// Live nodes only; slots past `nodes_used` are unallocated scratch.
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes[..self.nodes_used]
    }

    pub fn boxes(&self) -> &[IndexedBox] {
        &self.boxes
    }

    /// Estimated bytes occupied by the node and box arrays.
    pub fn byte_size(&self) -> usize {
        self.boxes.capacity() * std::mem::size_of::<IndexedBox>()
            + self.nodes.capacity() * std::mem::size_of::<BvhNode>()
            + std::mem::size_of::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with(positions: &[(f64, f64)], radius: f64) -> World {
        let mut world = World::new();
        for &(x, y) in positions {
            world.spawn(radius, NVec2::new(x, y));
        }
        world
    }

    fn subtree_contained(bvh: &BvhIndex, node_idx: usize) -> bool {
        let node = &bvh.nodes()[node_idx];
        let bounds = Aabb::new(node.aabb_min, node.aabb_max);
        if node.is_leaf() {
            bvh.boxes[node.first_box..node.first_box + node.box_count]
                .iter()
                .all(|b| bounds.contains(&b.aabb))
        } else {
            let l = &bvh.nodes()[node.left_child];
            let r = &bvh.nodes()[node.left_child + 1];
            bounds.contains(&Aabb::new(l.aabb_min, l.aabb_max))
                && bounds.contains(&Aabb::new(r.aabb_min, r.aabb_max))
                && subtree_contained(bvh, node.left_child)
                && subtree_contained(bvh, node.left_child + 1)
        }
    }

    #[test]
    fn two_bodies_never_subdivide() {
        let world = world_with(&[(10.0, 10.0), (200.0, 150.0)], 5.0);
        let mut bvh = BvhIndex::new();
        bvh.build(&world);

        let root = &bvh.nodes()[0];
        assert!(root.is_leaf());
        assert_eq!(root.box_count, 2);
        assert_eq!(bvh.nodes().len(), 1);
    }

    #[test]
    fn node_bounds_contain_their_subtrees() {
        let positions: Vec<(f64, f64)> = (0..60)
            .map(|i| {
                let f = f64::from(i);
                ((f * 37.0) % 500.0, (f * 23.0) % 300.0)
            })
            .collect();
        let world = world_with(&positions, 4.0);
        let mut bvh = BvhIndex::new();
        bvh.build(&world);

        assert!(subtree_contained(&bvh, 0));

        // Root AABB is the exact union of all boxes.
        let mut union = Aabb::empty();
        for b in bvh.boxes() {
            union.grow(&b.aabb);
        }
        let root = &bvh.nodes()[0];
        assert_eq!(root.aabb_min, union.min);
        assert_eq!(root.aabb_max, union.max);
    }

    #[test]
    fn overlapping_pair_in_same_leaf_is_detected() {
        let world = world_with(&[(10.0, 10.0), (12.0, 10.0)], 5.0);
        let mut bvh = BvhIndex::new();
        bvh.build(&world);

        let pairs = bvh.detect_collisions();
        assert_eq!(pairs.len(), 1);
        let (a, b) = pairs[0];
        assert!(a != b);
    }

    #[test]
    fn identical_centers_build_a_degenerate_leaf() {
        // Every box center lands on the same point, so the first split is
        // one-sided and subdivision aborts into a single large leaf.
        let world = world_with(&[(50.0, 50.0); 5], 3.0);
        let mut bvh = BvhIndex::new();
        bvh.build(&world);

        let root = &bvh.nodes()[0];
        assert!(root.is_leaf());
        assert_eq!(root.box_count, 5);
        // All-pairs within the leaf: C(5,2).
        assert_eq!(bvh.detect_collisions().len(), 10);
    }

    #[test]
    fn rebuild_on_unchanged_world_is_idempotent() {
        let positions: Vec<(f64, f64)> = (0..40)
            .map(|i| {
                let f = f64::from(i);
                ((f * 13.0) % 400.0, (f * 29.0) % 250.0)
            })
            .collect();
        let world = world_with(&positions, 4.0);

        let mut bvh = BvhIndex::new();
        bvh.build(&world);
        let mut first = bvh.detect_collisions();
        first.sort_unstable();

        bvh.build(&world);
        let mut second = bvh.detect_collisions();
        second.sort_unstable();

        assert_eq!(first, second);
    }

    #[test]
    fn empty_world_builds_empty_index() {
        let world = World::new();
        let mut bvh = BvhIndex::new();
        bvh.build(&world);
        assert!(bvh.nodes().is_empty());
        assert!(bvh.detect_collisions().is_empty());
    }
}
