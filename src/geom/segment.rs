//! Skeleton input types: radius-tagged segments chained from a start point.

use super::branchlets::BranchletError;
use super::{Point3, Tolerance, Vec3};

/// One piece of a branchlet skeleton.
///
/// `direction` carries both orientation and length. `radius` is the cross-section
/// radius at the top of the segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    direction: Vec3,
    radius: f64,
}

impl Segment {
    #[must_use]
    pub const fn new(direction: Vec3, radius: f64) -> Self {
        Self { direction, radius }
    }

    #[must_use]
    pub const fn direction(&self) -> Vec3 {
        self.direction
    }

    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.direction.length()
    }

    /// Unit direction scaled to the segment radius.
    pub(crate) fn radial_direction(&self) -> Vec3 {
        self.direction
            .normalized()
            .unwrap_or(Vec3::ZERO)
            .mul_scalar(self.radius)
    }
}

/// An ordered, non-empty chain of segments rooted at `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    start: Point3,
    segments: Vec<Segment>,
}

impl Skeleton {
    /// Validate and wrap a segment chain.
    pub fn new(start: Point3, segments: Vec<Segment>) -> Result<Self, BranchletError> {
        validate_skeleton(start, &segments)?;
        Ok(Self { start, segments })
    }

    #[must_use]
    pub const fn start(&self) -> Point3 {
        self.start
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Position of the skeleton tip (start plus every direction).
    #[must_use]
    pub fn tip(&self) -> Point3 {
        self.segments
            .iter()
            .fold(self.start, |p, seg| p.add_vec(seg.direction))
    }
}

/// Checks the preconditions every builder stage relies on.
///
/// Rejects empty chains, non-finite data, zero-length directions and non-positive radii.
pub(crate) fn validate_skeleton(start: Point3, segments: &[Segment]) -> Result<(), BranchletError> {
    if !start.is_finite() {
        return Err(BranchletError::NonFiniteInput);
    }
    if segments.is_empty() {
        return Err(BranchletError::EmptySkeleton);
    }

    let tol = Tolerance::ZERO_LENGTH;
    for (index, seg) in segments.iter().enumerate() {
        if !seg.direction.is_finite() || !seg.radius.is_finite() {
            return Err(BranchletError::NonFiniteSegment { index });
        }
        if tol.is_zero_vec3(seg.direction) {
            return Err(BranchletError::DegenerateSegment { index });
        }
        if seg.radius <= 0.0 {
            return Err(BranchletError::InvalidRadius { index });
        }
    }

    Ok(())
}
