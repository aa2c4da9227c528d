//! Cross-section ellipse fitting at branchlet joints.
//!
//! An end ring is a circle perpendicular to its single segment. An interior ring
//! lies in the plane that bisects the bend between the segment below and the
//! segment above, so adjacent rings neither pinch nor cross at sharp bends.
//!
//! The interior case is solved on the oblique triangle formed by a point `p` on
//! the bottom segment's surface line, a point `q` on the top segment's surface
//! line and their intersection `r`:
//!
//! ```text
//!            q
//!           /
//!          /  top surface line
//!    r ---+
//!     |  /
//!     | /  B = angle between the two segment directions
//!     |/
//!     p    bottom surface line
//! ```
//!
//! The law of sines gives `|pr|`, and `major = r - joint`.

use std::f64::consts::{FRAC_PI_2, PI};

use super::segment::Segment;
use super::{Point3, Vec3};

/// Cross products shorter than this fall back to the world Y reference axis.
const REFERENCE_AXIS_EPS: f64 = 0.001;

/// A joint only gets a bisecting ellipse when the top segment reaches at least
/// this many bottom radii away from the bottom segment's axis.
pub const JOINT_SLACK: f64 = 1.1;

/// Major/minor axis vectors of a ring's ellipse; magnitudes are the ellipse radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseAxes {
    pub major: Vec3,
    pub minor: Vec3,
}

/// Which path the joint fitter took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointFit {
    /// Ellipse solved in the bisecting plane of the two segments.
    Bisecting,
    /// Segments too parallel or the top segment too short; both were merged
    /// into one synthetic segment and fitted as an end ring.
    Merged,
}

/// Circle perpendicular to `seg`, expressed as two orthogonal radius vectors.
#[must_use]
pub fn fit_segment_ellipse(seg: &Segment) -> EllipseAxes {
    let direction = seg.direction();

    let mut reference = direction.cross(-Vec3::X);
    if reference.length() < REFERENCE_AXIS_EPS {
        // Segment runs (almost) along the X axis.
        let alternative = direction.cross(Vec3::Y);
        if alternative.normalized().is_some() {
            reference = alternative;
        }
    }

    let minor = reference
        .normalized()
        .unwrap_or(Vec3::Z)
        .mul_scalar(seg.radius());
    let major = seg.radial_direction().rotated_about(minor, -FRAC_PI_2);

    EllipseAxes { major, minor }
}

/// Fits the ellipse at `center`, the joint where `bottom` ends and `top` begins.
#[must_use]
pub fn fit_joint_ellipse(center: Point3, bottom: &Segment, top: &Segment) -> (EllipseAxes, JointFit) {
    let bottom_dir = bottom.direction();
    let top_dir = top.direction();

    // Both directions are treated as leaving the joint from the same point.
    let bend = bottom_dir.angle_to(top_dir);
    let reach = (FRAC_PI_2 - bend).cos() * top.length();

    if reach < bottom.radius() * JOINT_SLACK {
        return merged_fit(bottom, top);
    }

    let Some(fold) = top_dir.cross(bottom_dir).normalized() else {
        return merged_fit(bottom, top);
    };
    let minor = fold.mul_scalar(top.radius());

    let p = center
        .sub_vec(bottom_dir)
        .add_vec(bottom.radial_direction().rotated_about(minor, -FRAC_PI_2));
    let q = center.add_vec(top.radial_direction().rotated_about(minor, -FRAC_PI_2));

    let p_to_q = q - p;
    let angle_at_q = PI - (bottom_dir.angle_to(p_to_q) + bend);
    let p_to_r = p_to_q.length() * (angle_at_q.sin() / bend.sin());

    let bottom_unit = bottom_dir.normalized().unwrap_or(Vec3::ZERO);
    let r = p.add_vec(bottom_unit.mul_scalar(p_to_r));

    (
        EllipseAxes {
            major: r - center,
            minor,
        },
        JointFit::Bisecting,
    )
}

/// The synthetic segment used when a joint is too shallow to bisect.
///
/// Carries the summed direction and the top radius. Exactly opposed segments of
/// equal length sum to zero; the bottom direction stands in for them.
#[must_use]
pub fn merged_segment(bottom: &Segment, top: &Segment) -> Segment {
    let sum = bottom.direction() + top.direction();
    let direction = if sum.normalized().is_some() {
        sum
    } else {
        bottom.direction()
    };
    Segment::new(direction, top.radius())
}

fn merged_fit(bottom: &Segment, top: &Segment) -> (EllipseAxes, JointFit) {
    (fit_segment_ellipse(&merged_segment(bottom, top)), JointFit::Merged)
}
