//! Per-frame motion: velocity integration and screen-edge reflection.

use crate::simulation::states::Body;

/// Advance a body's position by one step of its velocity.
pub fn advance(body: &mut Body, dt: f64) {
    body.x += body.v * dt;
}

/// Reflect a body that crossed a screen edge.
///
/// Each edge flips a velocity component for the two velocity quadrants
/// listed below, checked in the order bottom, left, right, top against the
/// velocity as it stands at that point. The comparisons are strict: a body
/// moving exactly axis-aligned into a wall matches no rule and passes
/// through undeflected.
pub fn reflect_at_bounds(body: &mut Body, screen_width: f64, screen_height: f64) {
    let r = body.radius;

    // bottom
    if body.x.y + r > screen_height {
        if body.v.x > 0.0 && body.v.y > 0.0 {
            body.v.y = -body.v.y;
        } else if body.v.x < 0.0 && body.v.y > 0.0 {
            body.v.y = -body.v.y;
        }
    }

    // left
    if body.x.x - r < 0.0 {
        if body.v.x < 0.0 && body.v.y < 0.0 {
            body.v.x = -body.v.x;
        } else if body.v.x < 0.0 && body.v.y > 0.0 {
            body.v.x = -body.v.x;
        }
    }

    // right
    if body.x.x + r > screen_width {
        if body.v.x > 0.0 && body.v.y > 0.0 {
            body.v.x = -body.v.x;
        } else if body.v.x > 0.0 && body.v.y < 0.0 {
            body.v.x = -body.v.x;
        }
    }

    // top
    if body.x.y - r < 0.0 {
        if body.v.x > 0.0 && body.v.y < 0.0 {
            body.v.y = -body.v.y;
        } else if body.v.x < 0.0 && body.v.y < 0.0 {
            body.v.y = -body.v.y;
        }
    }
}
