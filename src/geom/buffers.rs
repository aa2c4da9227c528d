//! The append-only buffer set handed to a mesh construction host.
//!
//! Layout matches the usual polygon-mesh creation contract: a vertex array,
//! a per-face corner count, flattened per-face vertex indices, a UV array and
//! flattened per-face UV indices sharing the face grouping.

use serde::Serialize;

use super::connectivity::{QUAD, TRIANGLE};

/// Hosts refuse to build meshes with this many vertices or fewer.
pub const MIN_BUILDABLE_VERTICES: usize = 2;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshBuffers {
    pub(crate) positions: Vec<[f64; 3]>,
    pub(crate) face_counts: Vec<u32>,
    pub(crate) face_connects: Vec<u32>,
    pub(crate) uvs: Vec<[f64; 2]>,
    pub(crate) uv_connects: Vec<u32>,
}

impl MeshBuffers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn positions(&self) -> &[[f64; 3]] {
        &self.positions
    }

    #[must_use]
    pub fn face_counts(&self) -> &[u32] {
        &self.face_counts
    }

    #[must_use]
    pub fn face_connects(&self) -> &[u32] {
        &self.face_connects
    }

    #[must_use]
    pub fn uvs(&self) -> &[[f64; 2]] {
        &self.uvs
    }

    #[must_use]
    pub fn uv_connects(&self) -> &[u32] {
        &self.uv_connects
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn face_count(&self) -> usize {
        self.face_counts.len()
    }

    #[must_use]
    pub fn uv_count(&self) -> usize {
        self.uvs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.face_counts.is_empty() && self.uvs.is_empty()
    }

    /// Whether a host would accept these buffers (more than two vertices).
    #[must_use]
    pub fn is_buildable(&self) -> bool {
        self.positions.len() > MIN_BUILDABLE_VERTICES
    }

    /// All `u` values, in UV order.
    #[must_use]
    pub fn us(&self) -> Vec<f64> {
        self.uvs.iter().map(|uv| uv[0]).collect()
    }

    /// All `v` values, in UV order.
    #[must_use]
    pub fn vs(&self) -> Vec<f64> {
        self.uvs.iter().map(|uv| uv[1]).collect()
    }

    /// Position buffer as `[x0, y0, z0, x1, ...]`.
    #[must_use]
    pub fn positions_flat(&self) -> &[f64] {
        self.positions.as_flattened()
    }

    /// UV buffer as `[u0, v0, u1, v1, ...]`.
    #[must_use]
    pub fn uvs_flat(&self) -> &[f64] {
        self.uvs.as_flattened()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.face_counts.clear();
        self.face_connects.clear();
        self.uvs.clear();
        self.uv_connects.clear();
    }

    /// Appends `other`, re-basing its vertex and UV indices past the current content.
    pub fn append(&mut self, other: &MeshBuffers) {
        let vertex_base = self.positions.len() as u32;
        let uv_base = self.uvs.len() as u32;

        self.positions.extend_from_slice(&other.positions);
        self.face_counts.extend_from_slice(&other.face_counts);
        self.face_connects
            .extend(other.face_connects.iter().map(|i| i + vertex_base));
        self.uvs.extend_from_slice(&other.uvs);
        self.uv_connects
            .extend(other.uv_connects.iter().map(|i| i + uv_base));
    }

    /// Splits every face into a triangle fan around its first corner.
    ///
    /// Returns a triangle list indexing `positions`, for hosts without polygon support.
    #[must_use]
    pub fn triangulate(&self) -> Vec<u32> {
        let triangle_count: usize = self
            .face_counts
            .iter()
            .map(|&c| (c as usize).saturating_sub(2))
            .sum();
        let mut indices = Vec::with_capacity(triangle_count * 3);

        let mut offset = 0usize;
        for &count in &self.face_counts {
            let count = count as usize;
            let Some(face) = self.face_connects.get(offset..offset + count) else {
                break;
            };
            for k in 1..count.saturating_sub(1) {
                indices.extend_from_slice(&[face[0], face[k], face[k + 1]]);
            }
            offset += count;
        }

        indices
    }

    pub fn validate(&self) -> Result<(), String> {
        let corner_total: usize = self.face_counts.iter().map(|&c| c as usize).sum();
        if corner_total != self.face_connects.len() {
            return Err("face counts do not sum to the face index count".to_string());
        }
        if corner_total != self.uv_connects.len() {
            return Err("face counts do not sum to the uv index count".to_string());
        }
        if self
            .face_counts
            .iter()
            .any(|&c| c != QUAD && c != TRIANGLE)
        {
            return Err("faces must be quads or triangles".to_string());
        }
        let vertex_count = self.positions.len() as u32;
        if self.face_connects.iter().any(|&i| i >= vertex_count) {
            return Err("buffers have out-of-bounds vertex indices".to_string());
        }
        let uv_count = self.uvs.len() as u32;
        if self.uv_connects.iter().any(|&i| i >= uv_count) {
            return Err("buffers have out-of-bounds uv indices".to_string());
        }
        if self.positions.iter().flatten().any(|c| !c.is_finite()) {
            return Err("buffers have invalid vertex coordinates (NaN/Inf)".to_string());
        }
        if self.uvs.iter().flatten().any(|c| !c.is_finite()) {
            return Err("buffers have invalid uv coordinates (NaN/Inf)".to_string());
        }
        Ok(())
    }

    /// Owned, serializable view in the host hand-off layout.
    #[must_use]
    pub fn to_export(&self) -> MeshExport {
        MeshExport {
            vertex_count: self.positions.len(),
            vertices: self.positions_flat().to_vec(),
            face_counts: self.face_counts.clone(),
            face_connects: self.face_connects.clone(),
            us: self.us(),
            vs: self.vs(),
            uv_connects: self.uv_connects.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshExport {
    pub vertex_count: usize,
    pub vertices: Vec<f64>,
    pub face_counts: Vec<u32>,
    pub face_connects: Vec<u32>,
    pub us: Vec<f64>,
    pub vs: Vec<f64>,
    pub uv_connects: Vec<u32>,
}
