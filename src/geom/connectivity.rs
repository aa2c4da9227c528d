//! Face connectivity for closed tubes and open strips.
//!
//! Every face lists its corners counter-clockwise starting from the lower-left
//! corner. All indices are offset by the vertex count captured before the
//! branchlet's vertices were appended, so several branchlets can share one
//! buffer set.

use super::buffers::MeshBuffers;

pub(crate) const QUAD: u32 = 4;
pub(crate) const TRIANGLE: u32 = 3;

/// `segment_count * sides` quads followed by `sides` cap triangles.
pub(crate) fn push_tube_face_counts(buffers: &mut MeshBuffers, segment_count: usize, sides: usize) {
    let counts = &mut buffers.face_counts;
    counts.reserve(segment_count * sides + sides);
    counts.extend(std::iter::repeat_n(QUAD, segment_count * sides));
    counts.extend(std::iter::repeat_n(TRIANGLE, sides));
}

pub(crate) fn push_tube_face_connects(
    buffers: &mut MeshBuffers,
    segment_count: usize,
    sides: usize,
    vertex_base: usize,
) {
    let connects = &mut buffers.face_connects;
    connects.reserve(segment_count * sides * 4 + sides * 3);

    for ring in 0..segment_count {
        let first = (ring * sides + vertex_base) as u32;
        let stride = sides as u32;

        for side in 0..sides as u32 {
            let lower_left = first + side;
            // The last face of a ring wraps back to the ring's first vertex.
            let lower_right = if side + 1 == stride { first } else { lower_left + 1 };
            connects.extend_from_slice(&[
                lower_left,
                lower_right,
                lower_right + stride,
                lower_left + stride,
            ]);
        }
    }

    let first = (segment_count * sides + vertex_base) as u32;
    let stride = sides as u32;
    let cap = first + stride;
    for side in 0..stride {
        let left = first + side;
        let right = if side + 1 == stride { first } else { left + 1 };
        connects.extend_from_slice(&[left, right, cap]);
    }
}

/// One quad per segment plus a single cap triangle.
pub(crate) fn push_strip_face_counts(buffers: &mut MeshBuffers, segment_count: usize) {
    let counts = &mut buffers.face_counts;
    counts.reserve(segment_count + 1);
    counts.extend(std::iter::repeat_n(QUAD, segment_count));
    counts.push(TRIANGLE);
}

pub(crate) fn push_strip_face_connects(buffers: &mut MeshBuffers, segment_count: usize, vertex_base: usize) {
    let connects = &mut buffers.face_connects;
    connects.reserve(segment_count * 4 + 3);

    for segment in 0..segment_count {
        let lower_left = (segment * 2 + vertex_base) as u32;
        connects.extend_from_slice(&[lower_left, lower_left + 1, lower_left + 3, lower_left + 2]);
    }

    let last = (segment_count * 2 + vertex_base) as u32;
    connects.extend_from_slice(&[last, last + 1, last + 2]);
}
