//! Uniform grid (spatial hash) over body centers.
//!
//! A fixed `rows × cols` array of cells covers the screen; a body is
//! bucketed by truncating its center coordinates. Unlike the quadtree and
//! the BVH this index is patched incrementally: a body that stays in its
//! cell costs nothing per frame.
//!
//! Sizing contract: the 3×3 neighborhood query is only sound for bodies
//! whose diameter fits in one cell. Cell size must be chosen accordingly;
//! larger bodies can miss true overlaps.

use std::collections::HashMap;

use tracing::warn;

use crate::simulation::states::{BodyId, World};

#[derive(Debug, Default, Clone)]
struct Cell {
    item_ids: Vec<BodyId>,
}

#[derive(Debug)]
pub struct GridIndex {
    rows: usize,
    cols: usize,
    cell_width: f64,
    cell_height: f64,
    cells: Vec<Cell>,
    cell_of: HashMap<BodyId, usize>,
}

impl GridIndex {
    pub fn new(rows: usize, cols: usize, screen_width: f64, screen_height: f64) -> Self {
        assert!(rows > 0 && cols > 0, "grid must have at least one cell");
        Self {
            rows,
            cols,
            cell_width: screen_width / cols as f64,
            cell_height: screen_height / rows as f64,
            cells: vec![Cell::default(); rows * cols],
            cell_of: HashMap::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.item_ids.clear();
        }
        self.cell_of.clear();
    }

    fn cell_index(&self, center_x: f64, center_y: f64) -> Option<usize> {
        let col = (center_x / self.cell_width).floor() as i64;
        let row = (center_y / self.cell_height).floor() as i64;
        if col < 0 || col >= self.cols as i64 || row < 0 || row >= self.rows as i64 {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    /// Buckets a body by its center. An out-of-range center is a rejected
    /// insert: the body is simply absent from this index until its next
    /// update, and other entries are untouched.
    pub fn insert(&mut self, id: BodyId, center_x: f64, center_y: f64) -> bool {
        match self.cell_index(center_x, center_y) {
            Some(index) => {
                self.cells[index].item_ids.push(id);
                self.cell_of.insert(id, index);
                true
            }
            None => {
                warn!(id, center_x, center_y, "grid insert out of range, body dropped for this frame");
                false
            }
        }
    }

    pub fn remove(&mut self, id: BodyId) {
        if let Some(index) = self.cell_of.remove(&id) {
            self.cells[index].item_ids.retain(|&other| other != id);
        }
    }

    /// Incremental per-frame update: re-bucket only the bodies whose cell
    /// changed. Bodies rejected last frame get another insert attempt.
    pub fn update(&mut self, world: &World) {
        for body in world.bodies() {
            let target = self.cell_index(body.x.x, body.x.y);
            match (self.cell_of.get(&body.id).copied(), target) {
                (Some(current), Some(next)) if current == next => {}
                _ => {
                    self.remove(body.id);
                    self.insert(body.id, body.x.x, body.x.y);
                }
            }
        }
    }

    /// Ids bucketed in the 3×3 block of cells centered on `id`'s cell,
    /// including `id` itself. Neighbor rows/cols outside the grid are
    /// skipped, so the query never wraps across a row boundary. Unknown
    /// (rejected or stale) ids yield nothing.
    pub fn query(&self, id: BodyId) -> Vec<BodyId> {
        let Some(&index) = self.cell_of.get(&id) else {
            return Vec::new();
        };
        let row = (index / self.cols) as i64;
        let col = (index % self.cols) as i64;

        let mut found = Vec::new();
        for dr in -1..=1 {
            for dc in -1..=1 {
                let (nr, nc) = (row + dr, col + dc);
                if nr < 0 || nr >= self.rows as i64 || nc < 0 || nc >= self.cols as i64 {
                    continue;
                }
                let cell = &self.cells[nr as usize * self.cols + nc as usize];
                found.extend_from_slice(&cell.item_ids);
            }
        }
        found
    }

    /// Estimated bytes held by the cell array and the reverse map.
    pub fn byte_size(&self) -> usize {
        let mut count = self.cells.len() * std::mem::size_of::<Cell>();
        for cell in &self.cells {
            count += cell.item_ids.capacity() * std::mem::size_of::<BodyId>();
        }
        count += self.cell_of.len()
            * (std::mem::size_of::<BodyId>() + std::mem::size_of::<usize>());
        count
    }

    #[cfg(test)]
    fn invariant_holds(&self) -> bool {
        // Every mapped id sits in exactly the recorded cell, and every
        // bucketed id is mapped.
        self.cell_of.iter().all(|(id, &index)| {
            self.cells[index].item_ids.contains(id)
        }) && self
            .cells
            .iter()
            .enumerate()
            .all(|(index, cell)| {
                cell.item_ids
                    .iter()
                    .all(|id| self.cell_of.get(id) == Some(&index))
            })
    }
}
