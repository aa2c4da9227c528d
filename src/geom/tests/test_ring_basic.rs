use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use crate::geom::{EllipseAxes, Point3, Vec3, push_ring, vector_polar};

#[test]
fn polar_axis_directions_are_exact() {
    assert_eq!(vector_polar(1.0, 0.0), 0.0);
    assert_eq!(vector_polar(0.0, 1.0), FRAC_PI_2);
    assert_eq!(vector_polar(-1.0, 0.0), PI);
    assert_eq!(vector_polar(0.0, -1.0), 3.0 * FRAC_PI_2);
    assert_eq!(vector_polar(0.0, 0.0), 0.0);
}

#[test]
fn polar_covers_every_quadrant() {
    let cases = [
        ((1.0, 1.0), FRAC_PI_4),
        ((-1.0, 1.0), 3.0 * FRAC_PI_4),
        ((-1.0, -1.0), 5.0 * FRAC_PI_4),
        ((1.0, -1.0), 7.0 * FRAC_PI_4),
    ];
    for ((x, z), expected) in cases {
        let angle = vector_polar(x, z);
        assert!((angle - expected).abs() < 1e-12, "({x}, {z}) -> {angle}");
    }
}

#[test]
fn polar_round_trips_sampled_angles() {
    for step in 0..360 {
        let t = f64::from(step) * TAU / 360.0;
        let angle = vector_polar(2.5 * t.cos(), 2.5 * t.sin());
        assert!((0.0..TAU).contains(&angle));
        let diff = (angle - t).abs();
        assert!(diff < 1e-9 || (TAU - diff) < 1e-9, "t={t} angle={angle}");
    }
}

#[test]
fn polar_of_tiny_negative_z_stays_below_tau() {
    let angle = vector_polar(1.0, -1e-18);
    assert!((0.0..TAU).contains(&angle));
}

#[test]
fn circular_ring_points_sit_on_radius() {
    let axes = EllipseAxes {
        major: Vec3::new(0.5, 0.0, 0.0),
        minor: Vec3::new(0.0, 0.0, 0.5),
    };
    let center = Point3::new(1.0, 2.0, 3.0);

    let mut positions = Vec::new();
    push_ring(&mut positions, axes, center, 7);

    assert_eq!(positions.len(), 7);
    for p in &positions {
        let d = Point3::from_array(*p).distance_to(center);
        assert!((d - 0.5).abs() < 1e-12);
    }
    // Start angle is zero when the major axis points along +X.
    assert_eq!(positions[0], [1.5, 2.0, 3.0]);
}

#[test]
fn ring_steps_clockwise_by_equal_angles() {
    let axes = EllipseAxes {
        major: Vec3::new(1.0, 0.0, 0.0),
        minor: Vec3::new(0.0, 0.0, 1.0),
    };

    let mut positions = Vec::new();
    push_ring(&mut positions, axes, Point3::ORIGIN, 4);

    let expected = [
        [1.0, 0.0, 0.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
    ];
    for (p, e) in positions.iter().zip(expected) {
        for k in 0..3 {
            assert!((p[k] - e[k]).abs() < 1e-12, "{p:?} vs {e:?}");
        }
    }
}

#[test]
fn ring_appends_after_existing_points() {
    let axes = EllipseAxes {
        major: Vec3::new(0.0, 0.0, 1.0),
        minor: Vec3::new(1.0, 0.0, 0.0),
    };

    let mut positions = vec![[9.0, 9.0, 9.0]];
    push_ring(&mut positions, axes, Point3::ORIGIN, 3);

    assert_eq!(positions.len(), 4);
    assert_eq!(positions[0], [9.0, 9.0, 9.0]);
}
