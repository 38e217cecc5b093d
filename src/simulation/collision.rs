//! Narrow-phase circle test and elastic collision resolution.
//!
//! Whatever index produced a candidate pair, the same two-step contract
//! applies: `circles_overlap` confirms the contact, `resolve_elastic`
//! exchanges momentum along the contact normal.

use crate::simulation::states::{Body, BodyColor, NVec2};

/// Squared-distance circle overlap: `d² ≤ (ra + rb)²`.
pub fn circles_overlap(center_a: NVec2, radius_a: f64, center_b: NVec2, radius_b: f64) -> bool {
    let radii = radius_a + radius_b;
    (center_b - center_a).norm_squared() <= radii * radii
}

/// Momentum-conserving elastic exchange between two overlapping bodies.
///
/// Velocities are decomposed into normal and tangential components; the
/// normal components exchange via the 1-D elastic formula with each body's
/// mass, the tangential components pass through unchanged. Coincident
/// centers leave the normal undefined, so that case is a no-op.
pub fn resolve_elastic(a: &mut Body, b: &mut Body) {
    if a.id == b.id {
        return;
    }

    let delta = b.x - a.x;
    let distance = delta.norm();
    if distance == 0.0 {
        return;
    }

    a.color = BodyColor::Collided;
    b.color = BodyColor::Collided;

    let normal = delta / distance;
    let tangent = NVec2::new(-normal.y, normal.x);

    let tan_a = a.v.dot(&tangent);
    let tan_b = b.v.dot(&tangent);
    let norm_a = a.v.dot(&normal);
    let norm_b = b.v.dot(&normal);

    // 1-D elastic collision along the normal axis.
    let total = a.mass + b.mass;
    let norm_a_after = (norm_a * (a.mass - b.mass) + 2.0 * b.mass * norm_b) / total;
    let norm_b_after = (norm_b * (b.mass - a.mass) + 2.0 * a.mass * norm_a) / total;

    a.v = tangent * tan_a + normal * norm_a_after;
    b.v = tangent * tan_b + normal * norm_b_after;
}
