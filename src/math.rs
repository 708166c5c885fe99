use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Angles beyond this many radians skip the whole-turn loop
pub const WRAP_LIMIT: f32 = 4096.0 * TAU;

/// Wraps an angle (radians) into `[-PI, PI]`
///
/// Steps by whole turns instead of using `rem_euclid`,
/// so values already in range are returned untouched.
/// Angles past [`WRAP_LIMIT`] are reduced with `rem_euclid` first,
/// far enough out subtracting `TAU` leaves an `f32` unchanged.
#[must_use]
pub fn normalize_angle(mut angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }

    if angle.abs() > WRAP_LIMIT {
        angle = angle.rem_euclid(TAU);
    }

    while angle > PI {
        angle -= TAU;
    }

    while angle < -PI {
        angle += TAU;
    }

    angle
}

/// Unit vector a car with heading `angle_deg` travels along.
///
/// Heading 0 points up the screen (-y) and increases clockwise.
#[must_use]
pub fn heading_dir(angle_deg: f32) -> Vec2 {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    Vec2::new(sin, -cos)
}

/// Heading (radians, same convention as [`heading_dir`]) that points from `from` to `to`
#[must_use]
pub fn heading_to(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.x.atan2(-delta.y)
}
