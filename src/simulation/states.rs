//! Core state types for the collision simulation.
//!
//! Defines the 2D body record and the `World` store that owns every body:
//! - `Body` using `NVec2`
//! - `World` holding the body list, the id→slot map and the id allocator
//!
//! The spatial indices never copy body state; they hold `BodyId`s into the
//! world, so a body's authoritative data always lives in one place.

use std::collections::HashMap;

use nalgebra::Vector2;

use crate::simulation::geometry::{Aabb, Rect};

pub type NVec2 = Vector2<f64>;

/// Identifier of a body, unique for the lifetime of a `World`.
pub type BodyId = u32;

/// Visual feedback tag. Set by the resolver, consumed by the viewer;
/// has no effect on the physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyColor {
    Base,
    Collided,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub radius: f64,
    pub mass: f64, // synthetic: 2 * radius
    pub color: BodyColor,
}

impl Body {
    pub fn new(id: BodyId, radius: f64, position: NVec2) -> Self {
        Self {
            id,
            x: position,
            v: NVec2::zeros(),
            radius,
            mass: 2.0 * radius,
            color: BodyColor::Base,
        }
    }

    /// Bounding rectangle, center ± radius. Recomputed on demand, never stored.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.x.x - self.radius,
            self.x.y - self.radius,
            2.0 * self.radius,
            2.0 * self.radius,
        )
    }

    /// Min/max-corner form of the same box.
    pub fn aabb(&self) -> Aabb {
        Aabb::of_circle(self.x, self.radius)
    }
}

/// Exclusive owner of all body state.
///
/// Ids are handed out monotonically and survive population resets, so a
/// stale id from a previous generation can never alias a live body.
#[derive(Debug, Default)]
pub struct World {
    bodies: Vec<Body>,
    slots: HashMap<BodyId, usize>,
    next_id: BodyId,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every body. The id allocator is not reset.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.slots.clear();
    }

    pub fn spawn(&mut self, radius: f64, position: NVec2) -> BodyId {
        let id = self.next_id;
        self.next_id += 1;
        self.slots.insert(id, self.bodies.len());
        self.bodies.push(Body::new(id, radius, position));
        id
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.slots.get(&id).map(|&i| &self.bodies[i])
    }

    /// Two distinct mutable bodies out of the store, resolver-style.
    /// `split_at_mut` keeps the borrow checker happy on stable.
    pub fn pair_mut(&mut self, a: BodyId, b: BodyId) -> Option<(&mut Body, &mut Body)> {
        let ia = *self.slots.get(&a)?;
        let ib = *self.slots.get(&b)?;
        if ia == ib {
            return None;
        }
        if ia < ib {
            let (lo, hi) = self.bodies.split_at_mut(ib);
            Some((&mut lo[ia], &mut hi[0]))
        } else {
            let (lo, hi) = self.bodies.split_at_mut(ia);
            Some((&mut hi[0], &mut lo[ib]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_across_resets() {
        let mut world = World::new();
        let a = world.spawn(5.0, NVec2::new(1.0, 1.0));
        let b = world.spawn(5.0, NVec2::new(2.0, 2.0));
        assert!(b > a);

        world.clear();
        let c = world.spawn(5.0, NVec2::new(3.0, 3.0));
        assert!(c > b, "allocator must not reuse ids after a reset");
        assert!(world.get(a).is_none());
    }

    #[test]
    fn mass_is_twice_radius() {
        let body = Body::new(0, 4.5, NVec2::zeros());
        assert_eq!(body.mass, 9.0);
    }

    #[test]
    fn pair_mut_returns_both_orders() {
        let mut world = World::new();
        let a = world.spawn(1.0, NVec2::new(0.0, 0.0));
        let b = world.spawn(2.0, NVec2::new(5.0, 0.0));

        let (ba, bb) = world.pair_mut(a, b).unwrap();
        assert_eq!((ba.id, bb.id), (a, b));

        let (bb, ba) = world.pair_mut(b, a).unwrap();
        assert_eq!((bb.id, ba.id), (b, a));

        assert!(world.pair_mut(a, a).is_none());
    }
}
