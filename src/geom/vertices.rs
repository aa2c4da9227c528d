//! Vertex coordinates for one branchlet: one ring per joint plus a cap vertex.

use super::ellipse::{JointFit, fit_joint_ellipse, fit_segment_ellipse};
use super::ring::push_ring;
use super::segment::Segment;
use super::Point3;

/// Appends `(segments.len() + 1) * sides + 1` vertices and returns how many
/// interior joints fell back to the merged-segment fit.
///
/// `segments` must be non-empty; callers validate before reaching here.
pub(crate) fn push_vertex_coords(
    positions: &mut Vec<[f64; 3]>,
    start: Point3,
    segments: &[Segment],
    sides: usize,
) -> usize {
    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        return 0;
    };

    positions.reserve((segments.len() + 1) * sides + 1);

    let mut center = start;
    push_ring(positions, fit_segment_ellipse(first), center, sides);
    center = center.add_vec(first.direction());

    let mut merged_joints = 0;
    for pair in segments.windows(2) {
        let (axes, fit) = fit_joint_ellipse(center, &pair[0], &pair[1]);
        if fit == JointFit::Merged {
            merged_joints += 1;
        }
        push_ring(positions, axes, center, sides);
        center = center.add_vec(pair[1].direction());
    }

    push_ring(positions, fit_segment_ellipse(last), center, sides);

    // Rounded tip, assuming an idealized many-sided cylinder.
    let cap = center.add_vec(last.radial_direction());
    positions.push(cap.to_array());

    merged_joints
}
