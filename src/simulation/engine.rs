//! High-level runtime engine settings
//!
//! Selects the active broad-phase index and whether the viewer draws the
//! index's debug geometry

/// Which broad-phase index drives candidate generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    QuadTree,
    Grid,
    Bvh,
}

#[derive(Debug, Clone)]
pub struct Engine {
    pub index: IndexKind,    // active broad-phase strategy
    pub draw_lines: bool,    // debug geometry on/off
}
