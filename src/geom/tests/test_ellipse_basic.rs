use crate::geom::{
    EllipseAxes, JOINT_SLACK, JointFit, Point3, Segment, Tolerance, Vec3, fit_joint_ellipse,
    fit_segment_ellipse, merged_segment,
};

fn assert_vec_close(actual: Vec3, expected: Vec3) {
    assert!(
        Tolerance::LOOSE.approx_eq_vec3(actual, expected),
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn vertical_segment_gives_circle_in_xz_plane() {
    let seg = Segment::new(Vec3::new(0.0, 2.0, 0.0), 0.25);
    let EllipseAxes { major, minor } = fit_segment_ellipse(&seg);

    assert_vec_close(minor, Vec3::new(0.0, 0.0, 0.25));
    assert_vec_close(major, Vec3::new(0.25, 0.0, 0.0));
}

#[test]
fn segment_axes_are_perpendicular_and_radius_long() {
    let directions = [
        Vec3::new(1.0, 2.0, 3.0),
        Vec3::new(-0.5, 0.1, 4.0),
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(3.0, 0.0, 0.0),
        Vec3::new(-2.0, 0.0005, 0.0),
    ];

    for direction in directions {
        let seg = Segment::new(direction, 0.4);
        let axes = fit_segment_ellipse(&seg);

        assert!((axes.major.length() - 0.4).abs() < 1e-9, "{direction:?}");
        assert!((axes.minor.length() - 0.4).abs() < 1e-9, "{direction:?}");
        assert!(axes.major.dot(axes.minor).abs() < 1e-9, "{direction:?}");
        assert!(axes.major.dot(direction).abs() < 1e-9, "{direction:?}");
        assert!(axes.minor.dot(direction).abs() < 1e-9, "{direction:?}");
    }
}

#[test]
fn segment_along_x_uses_y_reference() {
    let seg = Segment::new(Vec3::new(5.0, 0.0, 0.0), 1.0);
    let axes = fit_segment_ellipse(&seg);

    // X × Y = Z
    assert_vec_close(axes.minor, Vec3::Z);
    assert!(axes.major.is_finite());
    assert!((axes.major.length() - 1.0).abs() < 1e-9);
}

#[test]
fn right_angle_joint_is_mitered() {
    let bottom = Segment::new(Vec3::Y, 0.1);
    let top = Segment::new(Vec3::X, 0.1);
    let center = Point3::new(0.0, 1.0, 0.0);

    let (axes, fit) = fit_joint_ellipse(center, &bottom, &top);

    assert_eq!(fit, JointFit::Bisecting);
    assert_vec_close(axes.minor, Vec3::new(0.0, 0.0, 0.1));
    assert_vec_close(axes.major, Vec3::new(0.1, -0.1, 0.0));
}

#[test]
fn straight_joint_falls_back_to_merged_segment() {
    let bottom = Segment::new(Vec3::new(0.0, 1.0, 0.0), 0.3);
    let top = Segment::new(Vec3::new(0.0, 1.5, 0.0), 0.2);
    let center = Point3::new(0.0, 1.0, 0.0);

    let (axes, fit) = fit_joint_ellipse(center, &bottom, &top);

    assert_eq!(fit, JointFit::Merged);
    assert_eq!(axes, fit_segment_ellipse(&merged_segment(&bottom, &top)));
    assert!((axes.major.length() - 0.2).abs() < 1e-12);
}

#[test]
fn fallback_threshold_is_strict() {
    let bottom = Segment::new(Vec3::Y, 0.5);
    let threshold = 0.5 * JOINT_SLACK;
    let center = Point3::new(0.0, 1.0, 0.0);

    // The perpendicular reach of the top segment is its x component here.
    let short = Segment::new(Vec3::new(threshold - 1e-6, 1.0, 0.0), 0.4);
    let (_, fit) = fit_joint_ellipse(center, &bottom, &short);
    assert_eq!(fit, JointFit::Merged);

    let reaching = Segment::new(Vec3::new(threshold + 1e-6, 1.0, 0.0), 0.4);
    let (_, fit) = fit_joint_ellipse(center, &bottom, &reaching);
    assert_eq!(fit, JointFit::Bisecting);
}

#[test]
fn merged_segment_sums_directions_and_keeps_top_radius() {
    let bottom = Segment::new(Vec3::new(0.0, 1.0, 0.0), 0.3);
    let top = Segment::new(Vec3::new(0.1, 1.0, 0.0), 0.2);

    let merged = merged_segment(&bottom, &top);
    assert_vec_close(merged.direction(), Vec3::new(0.1, 2.0, 0.0));
    assert_eq!(merged.radius(), 0.2);
}

#[test]
fn opposed_segments_merge_to_bottom_direction() {
    let bottom = Segment::new(Vec3::Y, 0.3);
    let top = Segment::new(-Vec3::Y, 0.2);

    let merged = merged_segment(&bottom, &top);
    assert_eq!(merged.direction(), Vec3::Y);

    let (axes, fit) = fit_joint_ellipse(Point3::new(0.0, 1.0, 0.0), &bottom, &top);
    assert_eq!(fit, JointFit::Merged);
    assert!(axes.major.is_finite() && axes.minor.is_finite());
}
