//! Branchlet accumulator: picks the tube or strip algorithm from `sides` and
//! appends any number of skeletons into one shared buffer set.
//!
//! Each `add_one` runs the stages in order:
//!
//! 1. vertex rings along the skeleton plus a cap vertex
//! 2. face counts and face vertex indices
//! 3. UV coordinates and UV indices
//!
//! Index offsets for stages 2 and 3 are the vertex/UV counts captured before
//! stage 1, so earlier branchlets in the buffers never disturb the arithmetic.

use super::buffers::MeshBuffers;
use super::connectivity::{
    push_strip_face_connects, push_strip_face_counts, push_tube_face_connects,
    push_tube_face_counts,
};
use super::diagnostics::BranchletDiagnostics;
use super::metrics::{BranchletMetrics, TimingBucket};
use super::segment::{Segment, Skeleton, validate_skeleton};
use super::uv::{push_strip_uv_connects, push_strip_uvs, push_tube_uv_connects, push_tube_uvs};
use super::vertices::push_vertex_coords;
use super::Point3;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BranchletError {
    #[error("cannot create branchlets with less than 2 sides (got {sides})")]
    InvalidSidesCount { sides: usize },
    #[error("branchlet skeleton requires at least one segment")]
    EmptySkeleton,
    #[error("segment {index} has a non-finite direction or radius")]
    NonFiniteSegment { index: usize },
    #[error("segment {index} has a zero-length direction")]
    DegenerateSegment { index: usize },
    #[error("segment {index} radius must be > 0")]
    InvalidRadius { index: usize },
    #[error("start point and v offset must be finite")]
    NonFiniteInput,
    #[error("uv width multiplier and texture aspect must be finite and > 0")]
    InvalidOptions,
    #[error("cannot merge {found:?} buffers into {expected:?} buffers")]
    ModeMismatch {
        expected: BranchletMode,
        found: BranchletMode,
    },
    #[error("buffer set would exceed u32 indices")]
    IndexOverflow,
}

/// Texture-space controls shared by every branchlet in one buffer set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchletOptions {
    /// Scales the texture width wrapped once around a tube (or across a strip).
    pub u_width_multiplier: f64,
    /// Texture width-to-height ratio applied to the v spacing.
    pub texture_aspect: f64,
}

impl Default for BranchletOptions {
    fn default() -> Self {
        Self {
            u_width_multiplier: 1.0,
            texture_aspect: 1.0,
        }
    }
}

impl BranchletOptions {
    pub fn validate(&self) -> Result<(), BranchletError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(self.u_width_multiplier) && valid(self.texture_aspect) {
            Ok(())
        } else {
            Err(BranchletError::InvalidOptions)
        }
    }
}

/// Topology variant, chosen once from the requested side count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchletMode {
    /// Closed n-sided tube with a seam column in UV space (`sides > 2`).
    Tube { sides: usize },
    /// Open two-vertex-wide ribbon.
    Strip,
}

impl BranchletMode {
    pub fn from_sides(sides: usize) -> Result<Self, BranchletError> {
        match sides {
            0 | 1 => {
                log::warn!("Cannot create Branchlets with less than 2 sides (got {sides})");
                Err(BranchletError::InvalidSidesCount { sides })
            }
            2 => Ok(Self::Strip),
            sides => Ok(Self::Tube { sides }),
        }
    }

    #[must_use]
    pub const fn sides(self) -> usize {
        match self {
            Self::Tube { sides } => sides,
            Self::Strip => 2,
        }
    }

    /// Vertices one skeleton of `segment_count` segments adds, or `None` if the
    /// count does not fit in `usize`.
    #[must_use]
    pub fn vertices_for(self, segment_count: usize) -> Option<usize> {
        segment_count
            .checked_add(1)?
            .checked_mul(self.sides())?
            .checked_add(1)
    }

    /// UVs one skeleton of `segment_count` segments adds.
    #[must_use]
    pub fn uvs_for(self, segment_count: usize) -> Option<usize> {
        let rings = segment_count.checked_add(1)?;
        match self {
            Self::Tube { sides } => rings.checked_mul(sides.checked_add(1)?)?.checked_add(sides),
            Self::Strip => rings.checked_mul(2)?.checked_add(1),
        }
    }

    /// Faces one skeleton of `segment_count` segments adds, as `(quads, triangles)`.
    #[must_use]
    pub fn faces_for(self, segment_count: usize) -> Option<(usize, usize)> {
        match self {
            Self::Tube { sides } => Some((segment_count.checked_mul(sides)?, sides)),
            Self::Strip => Some((segment_count, 1)),
        }
    }
}

/// One buffer set holding any number of tubes or strips.
#[derive(Debug, Clone, PartialEq)]
pub struct Branchlets {
    mode: BranchletMode,
    options: BranchletOptions,
    buffers: MeshBuffers,
    diagnostics: BranchletDiagnostics,
}

impl Branchlets {
    /// Empty buffer set for `sides`-sided branchlets.
    pub fn new(sides: usize) -> Result<Self, BranchletError> {
        Self::with_options(sides, BranchletOptions::default())
    }

    pub fn with_options(sides: usize, options: BranchletOptions) -> Result<Self, BranchletError> {
        options.validate()?;
        let mode = BranchletMode::from_sides(sides)?;
        Ok(Self::from_mode(mode, options))
    }

    fn from_mode(mode: BranchletMode, options: BranchletOptions) -> Self {
        Self {
            mode,
            options,
            buffers: MeshBuffers::default(),
            diagnostics: BranchletDiagnostics::default(),
        }
    }

    /// Buffer set holding a single branchlet.
    pub fn create(
        start: Point3,
        sides: usize,
        segments: &[Segment],
        v_offset: f64,
    ) -> Result<Self, BranchletError> {
        let mut branchlets = Self::new(sides)?;
        branchlets.add_one(start, segments, v_offset)?;
        Ok(branchlets)
    }

    #[must_use]
    pub const fn mode(&self) -> BranchletMode {
        self.mode
    }

    #[must_use]
    pub const fn sides(&self) -> usize {
        self.mode.sides()
    }

    #[must_use]
    pub const fn options(&self) -> &BranchletOptions {
        &self.options
    }

    #[must_use]
    pub const fn buffers(&self) -> &MeshBuffers {
        &self.buffers
    }

    #[must_use]
    pub fn into_buffers(self) -> MeshBuffers {
        self.buffers
    }

    #[must_use]
    pub const fn diagnostics(&self) -> &BranchletDiagnostics {
        &self.diagnostics
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Appends one branchlet rooted at `start`.
    ///
    /// `v_offset` is the texture-space v of the first ring, letting several
    /// branchlets stack without overlapping. On error nothing is appended.
    pub fn add_one(
        &mut self,
        start: Point3,
        segments: &[Segment],
        v_offset: f64,
    ) -> Result<(), BranchletError> {
        validate_skeleton(start, segments)?;
        if !v_offset.is_finite() {
            return Err(BranchletError::NonFiniteInput);
        }

        let segment_count = segments.len();
        let (Some(vertices), Some(uvs), Some((quads, triangles))) = (
            self.mode.vertices_for(segment_count),
            self.mode.uvs_for(segment_count),
            self.mode.faces_for(segment_count),
        ) else {
            return Err(BranchletError::IndexOverflow);
        };
        self.check_capacity(vertices, uvs)?;

        let vertex_base = self.buffers.vertex_count();
        let uv_base = self.buffers.uv_count();
        let sides = self.mode.sides();
        let options = self.options;
        let buffers = &mut self.buffers;

        let mut metrics = BranchletMetrics::default();
        metrics.begin();

        let merged_joints = metrics.time(TimingBucket::Vertices, || {
            push_vertex_coords(&mut buffers.positions, start, segments, sides)
        });

        match self.mode {
            BranchletMode::Tube { sides } => {
                metrics.time(TimingBucket::Connectivity, || {
                    push_tube_face_connects(buffers, segment_count, sides, vertex_base);
                    push_tube_face_counts(buffers, segment_count, sides);
                });
                metrics.time(TimingBucket::Uvs, || {
                    push_tube_uvs(buffers, segments, sides, vertex_base, v_offset, &options);
                    push_tube_uv_connects(buffers, segment_count, sides, uv_base);
                });
            }
            BranchletMode::Strip => {
                metrics.time(TimingBucket::Connectivity, || {
                    push_strip_face_connects(buffers, segment_count, vertex_base);
                    push_strip_face_counts(buffers, segment_count);
                });
                metrics.time(TimingBucket::Uvs, || {
                    push_strip_uvs(buffers, segments, vertex_base, v_offset, &options);
                    push_strip_uv_connects(buffers, segment_count, uv_base);
                });
            }
        }

        let diagnostics = &mut self.diagnostics;
        diagnostics.branchlet_count += 1;
        diagnostics.vertex_count = self.buffers.vertex_count();
        diagnostics.uv_count = self.buffers.uv_count();
        diagnostics.quad_count += quads;
        diagnostics.triangle_count += triangles;
        diagnostics.degenerate_joint_count += merged_joints;
        if let Some(report) = metrics.end() {
            diagnostics
                .timing
                .get_or_insert_with(Default::default)
                .accumulate(&report);
        }

        log::debug!(
            "appended {}-sided branchlet: {segment_count} segments, {merged_joints} merged joints, {} vertices total",
            sides,
            self.buffers.vertex_count()
        );

        Ok(())
    }

    pub fn add_skeleton(&mut self, skeleton: &Skeleton, v_offset: f64) -> Result<(), BranchletError> {
        self.add_one(skeleton.start(), skeleton.segments(), v_offset)
    }

    /// Appends every `(skeleton, v_offset)` pair in order.
    ///
    /// With the `parallel` feature each skeleton is built into its own buffer set
    /// on the rayon pool and the results are merged sequentially. Either every
    /// skeleton is appended or none is.
    pub fn add_batch(&mut self, batch: &[(Skeleton, f64)]) -> Result<(), BranchletError> {
        let mode = self.mode;
        let options = self.options;
        let build_one = |(skeleton, v_offset): &(Skeleton, f64)| {
            let mut part = Self::from_mode(mode, options);
            part.add_skeleton(skeleton, *v_offset).map(|()| part)
        };

        #[cfg(feature = "parallel")]
        let parts: Vec<Self> = {
            use rayon::prelude::*;
            batch.par_iter().map(build_one).collect::<Result<_, _>>()?
        };
        #[cfg(not(feature = "parallel"))]
        let parts: Vec<Self> = batch.iter().map(build_one).collect::<Result<_, _>>()?;

        let (vertices, uvs) = parts.iter().fold((0usize, 0usize), |(v, u), part| {
            (
                v.saturating_add(part.buffers.vertex_count()),
                u.saturating_add(part.buffers.uv_count()),
            )
        });
        self.check_capacity(vertices, uvs)?;

        for part in parts {
            self.merge(part)?;
        }
        Ok(())
    }

    /// Appends another buffer set of the same mode, re-basing its indices.
    pub fn merge(&mut self, other: Branchlets) -> Result<(), BranchletError> {
        if other.mode != self.mode {
            return Err(BranchletError::ModeMismatch {
                expected: self.mode,
                found: other.mode,
            });
        }
        self.check_capacity(other.buffers.vertex_count(), other.buffers.uv_count())?;

        let mut metrics = BranchletMetrics::default();
        metrics.begin();
        metrics.time(TimingBucket::Merge, || self.buffers.append(&other.buffers));

        self.diagnostics.merge(&other.diagnostics);
        self.diagnostics.vertex_count = self.buffers.vertex_count();
        self.diagnostics.uv_count = self.buffers.uv_count();
        for report in metrics.end().iter().chain(other.diagnostics.timing.iter()) {
            self.diagnostics
                .timing
                .get_or_insert_with(Default::default)
                .accumulate(report);
        }
        Ok(())
    }

    /// Drops all geometry but keeps the mode and options.
    pub fn clear(&mut self) {
        self.buffers.clear();
        self.diagnostics = BranchletDiagnostics::default();
    }

    fn check_capacity(&self, extra_vertices: usize, extra_uvs: usize) -> Result<(), BranchletError> {
        let limit = u32::MAX as usize;
        let vertices = self.buffers.vertex_count().checked_add(extra_vertices);
        let uvs = self.buffers.uv_count().checked_add(extra_uvs);
        match (vertices, uvs) {
            (Some(v), Some(u)) if v <= limit && u <= limit => Ok(()),
            _ => Err(BranchletError::IndexOverflow),
        }
    }
}
