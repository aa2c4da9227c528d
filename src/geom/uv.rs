//! UV coordinates and UV connectivity.
//!
//! `u` follows angular position around the ring. `v` accumulates the 3D distance
//! between corresponding vertices of consecutive rings, scaled so a texel covers
//! roughly the same distance along and around the tube. Tubes carry one extra
//! seam column per ring because a cylinder cannot be unwrapped without a cut.

use std::f64::consts::{SQRT_2, TAU};

use super::branchlets::BranchletOptions;
use super::buffers::MeshBuffers;
use super::segment::Segment;
use super::Point3;

/// Ratio between a face's texture width and its 3D chord width.
///
/// The chord is the ring edge between two adjacent vertices of a ring with
/// `ring_radius`, from the law of cosines on the `2π / sides` wedge.
#[must_use]
pub fn v_scaler(ring_radius: f64, u_face_width: f64, sides: usize, texture_aspect: f64) -> f64 {
    let wedge = TAU / sides as f64;
    let radius_squared = ring_radius * ring_radius;
    let chord = (2.0 * radius_squared - 2.0 * radius_squared * wedge.cos()).sqrt();
    (u_face_width / chord) * texture_aspect
}

fn vertex_distance(positions: &[[f64; 3]], a: usize, b: usize) -> f64 {
    Point3::from_array(positions[a]).distance_to(Point3::from_array(positions[b]))
}

/// Appends `(segments.len() + 1) * (sides + 1) + sides` UVs for a tube whose
/// vertices start at `vertex_base`.
pub(crate) fn push_tube_uvs(
    buffers: &mut MeshBuffers,
    segments: &[Segment],
    sides: usize,
    vertex_base: usize,
    v_offset: f64,
    options: &BranchletOptions,
) {
    let Some(first) = segments.first() else {
        return;
    };
    let segment_count = segments.len();
    let u_face_width = options.u_width_multiplier / sides as f64;
    let uv_stride = sides + 1;
    let mut scaler = v_scaler(first.radius(), u_face_width, sides, options.texture_aspect);

    let positions = &buffers.positions;
    let uvs = &mut buffers.uvs;
    uvs.reserve((segment_count + 1) * uv_stride + sides);

    for ring in 0..=segment_count {
        for side in 0..sides {
            let u = side as f64 * u_face_width;
            let v = if ring == 0 {
                v_offset
            } else {
                let vertex = vertex_base + ring * sides + side;
                let below = uvs[uvs.len() - uv_stride][1];
                below + vertex_distance(positions, vertex, vertex - sides) * scaler
            };
            uvs.push([u, v]);
        }

        // Seam column: a full wrap in u, same v as the ring's first UV.
        let seam_v = uvs[uvs.len() - sides][1];
        uvs.push([sides as f64 * u_face_width, seam_v]);

        // Rings shrink going up; rescale so the texture shrinks uniformly with them.
        if let Some(next) = segments.get(ring + 1) {
            scaler = v_scaler(next.radius(), u_face_width, sides, options.texture_aspect);
        }
    }

    // Distance to the cap is radius·√2 when the ring is a perfect circle.
    let last_radius = segments[segment_count - 1].radius();
    let v_to_cap = scaler * last_radius * SQRT_2;
    for side in 0..sides {
        let n = uvs.len();
        let between_lower = (uvs[n - uv_stride][1] + uvs[n - sides][1]) / 2.0;
        uvs.push([
            side as f64 * u_face_width + u_face_width * 0.5,
            between_lower + v_to_cap,
        ]);
    }
}

/// Mirrors the tube's face connectivity with a UV stride of `sides + 1`.
pub(crate) fn push_tube_uv_connects(buffers: &mut MeshBuffers, segment_count: usize, sides: usize, uv_base: usize) {
    let connects = &mut buffers.uv_connects;
    connects.reserve(segment_count * sides * 4 + sides * 3);

    let uv_stride = (sides + 1) as u32;
    let mut lower_left = uv_base as u32;

    for _ in 0..segment_count {
        for _ in 0..sides {
            connects.extend_from_slice(&[
                lower_left,
                lower_left + 1,
                lower_left + 1 + uv_stride,
                lower_left + uv_stride,
            ]);
            lower_left += 1;
        }
        // Skip the seam column.
        lower_left += 1;
    }

    for _ in 0..sides {
        connects.extend_from_slice(&[lower_left, lower_left + 1, lower_left + uv_stride]);
        lower_left += 1;
    }
}

/// Appends `2 * (segments.len() + 1) + 1` UVs for a strip.
///
/// Even UVs sit at `u = 0`, odd ones at `u = u_width_multiplier`; a strip has no seam.
pub(crate) fn push_strip_uvs(
    buffers: &mut MeshBuffers,
    segments: &[Segment],
    vertex_base: usize,
    v_offset: f64,
    options: &BranchletOptions,
) {
    let Some(first) = segments.first() else {
        return;
    };
    let segment_count = segments.len();
    let u_face_width = options.u_width_multiplier;
    let mut scaler = v_scaler(first.radius(), u_face_width, 2, options.texture_aspect);

    let positions = &buffers.positions;
    let uvs = &mut buffers.uvs;
    uvs.reserve(2 * (segment_count + 1) + 1);

    uvs.push([0.0, v_offset]);
    uvs.push([u_face_width, v_offset]);

    for pair in 1..=segment_count {
        let radius = segments[pair.min(segment_count - 1)].radius();
        scaler = v_scaler(radius, u_face_width, 2, options.texture_aspect);

        for (column, u) in [0.0, u_face_width].into_iter().enumerate() {
            let vertex = vertex_base + pair * 2 + column;
            let below = uvs[uvs.len() - 2][1];
            uvs.push([u, below + vertex_distance(positions, vertex, vertex - 2) * scaler]);
        }
    }

    let v_to_cap = scaler * segments[segment_count - 1].radius() * SQRT_2;
    let n = uvs.len();
    let between_lower = (uvs[n - 2][1] + uvs[n - 1][1]) / 2.0;
    uvs.push([u_face_width * 0.5, between_lower + v_to_cap]);
}

pub(crate) fn push_strip_uv_connects(buffers: &mut MeshBuffers, segment_count: usize, uv_base: usize) {
    let connects = &mut buffers.uv_connects;
    connects.reserve(segment_count * 4 + 3);

    let mut lower_left = uv_base as u32;
    for _ in 0..segment_count {
        connects.extend_from_slice(&[lower_left, lower_left + 1, lower_left + 3, lower_left + 2]);
        lower_left += 2;
    }
    connects.extend_from_slice(&[lower_left, lower_left + 1, lower_left + 2]);
}
