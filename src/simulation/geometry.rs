//! Axis-aligned boxes in the two forms the indices consume.
//!
//! `Rect` is the corner+extent form used by the quadtree (screen
//! coordinates, y growing downwards); `Aabb` is the min/max-corner form
//! used by the BVH. Both are derived from a body's center and radius every
//! frame and never persisted on their own.

use crate::simulation::states::NVec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Inclusive rectangle intersection: touching edges count as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x <= other.x + other.w
            && self.x + self.w >= other.x
            && self.y <= other.y + other.h
            && self.y + self.h >= other.y
    }

    /// Strict containment on all four edges. An item exactly touching a
    /// split line is *not* contained and stays at the parent node.
    pub fn contains_strict(&self, other: &Rect) -> bool {
        self.x < other.x
            && self.y < other.y
            && self.x + self.w > other.x + other.w
            && self.y + self.h > other.y + other.h
    }

    /// The four equal child quadrants: top-left, top-right, bottom-left,
    /// bottom-right.
    pub fn quadrants(&self) -> [Rect; 4] {
        let cw = self.w / 2.0;
        let ch = self.h / 2.0;
        [
            Rect::new(self.x, self.y, cw, ch),
            Rect::new(self.x + cw, self.y, cw, ch),
            Rect::new(self.x, self.y + ch, cw, ch),
            Rect::new(self.x + cw, self.y + ch, cw, ch),
        ]
    }

    pub fn center(&self) -> NVec2 {
        NVec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: NVec2,
    pub max: NVec2,
}

impl Aabb {
    /// Inverted box that any `grow` collapses onto the first real bounds.
    pub fn empty() -> Self {
        Self {
            min: NVec2::new(f64::INFINITY, f64::INFINITY),
            max: NVec2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn new(min: NVec2, max: NVec2) -> Self {
        Self { min, max }
    }

    pub fn of_circle(center: NVec2, radius: f64) -> Self {
        let half = NVec2::new(radius, radius);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> NVec2 {
        (self.min + self.max) * 0.5
    }

    /// Inclusive AABB overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Expand to cover `other` (componentwise min/max reduction).
    pub fn grow(&mut self, other: &Aabb) {
        self.min = self.min.inf(&other.min);
        self.max = self.max.sup(&other.max);
    }

    pub fn contains(&self, other: &Aabb) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
    }
}
