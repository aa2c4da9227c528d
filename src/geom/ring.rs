//! Sampling ring vertices from an ellipse.

use std::f64::consts::TAU;

use super::ellipse::EllipseAxes;
use super::Point3;

/// World-space polar angle of `(x, z)` on the X-Z plane, in `[0, 2π)`.
///
/// Axis-aligned inputs resolve exactly (`+x -> 0`, `+z -> π/2`, `-x -> π`,
/// `-z -> 3π/2`); the origin maps to 0.
#[must_use]
pub fn vector_polar(x: f64, z: f64) -> f64 {
    if x == 0.0 && z == 0.0 {
        return 0.0;
    }
    let angle = z.atan2(x).rem_euclid(TAU);
    // rem_euclid can round a tiny negative angle up to exactly TAU.
    if angle >= TAU { 0.0 } else { angle }
}

/// Appends `sides` points of `p(t) = center + cos(t)·major + sin(t)·minor`.
///
/// Sampling starts at `-polar(major.x, major.z)` so consecutive rings stay
/// angularly aligned as their axes rotate, then steps clockwise by `2π / sides`.
pub fn push_ring(positions: &mut Vec<[f64; 3]>, axes: EllipseAxes, center: Point3, sides: usize) {
    let increment = -(TAU / sides as f64);
    let mut angle = -vector_polar(axes.major.x, axes.major.z);

    positions.reserve(sides);
    for _ in 0..sides {
        let vertex = center
            .add_vec(axes.major.mul_scalar(angle.cos()))
            .add_vec(axes.minor.mul_scalar(angle.sin()));
        positions.push(vertex.to_array());
        angle += increment;
    }
}
