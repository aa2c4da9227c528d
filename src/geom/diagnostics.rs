//! Build diagnostics for branchlet buffer sets.
//!
//! Diagnostics accumulate across every `add_one` call on a [`Branchlets`]
//! accumulator and describe what ended up in the shared buffers:
//!
//! - Buffer sizes (vertices, UVs, faces split into quads and triangles)
//! - How many interior joints were too shallow to bisect and fell back to a
//!   merged-segment ring
//! - Warnings for conditions the caller may want to surface, such as a host
//!   engine that was given an unbuildable side count
//! - Optional timing data
//!
//! # Example
//!
//! ```ignore
//! use branchlet_engine::geom::{Branchlets, Point3, Segment, Vec3};
//!
//! let mut branchlets = Branchlets::new(6)?;
//! branchlets.add_one(Point3::ORIGIN, &[Segment::new(Vec3::Y, 0.2)], 0.0)?;
//!
//! let diagnostics = branchlets.diagnostics();
//! println!("{}", diagnostics.summary());
//! ```
//!
//! [`Branchlets`]: super::Branchlets

use std::fmt;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct BranchletDiagnostics {
    /// Number of skeletons appended.
    pub branchlet_count: usize,

    /// Total number of vertices in the buffers.
    pub vertex_count: usize,

    /// Total number of UVs in the buffers (tubes carry one seam UV per ring).
    pub uv_count: usize,

    /// Four-sided body faces.
    pub quad_count: usize,

    /// Three-sided cap faces.
    pub triangle_count: usize,

    /// Interior joints whose segments were too parallel, or whose top segment was
    /// too short, to fit a bisecting ellipse.
    ///
    /// These rings were fitted to the merged segment instead. This is expected on
    /// straight runs and is not an error.
    pub degenerate_joint_count: usize,

    /// Optional timing breakdown by build stage.
    ///
    /// Only populated when the `branchlet_metrics` feature is enabled
    /// and the target is not WASM.
    pub timing: Option<super::metrics::BranchletTimingReport>,

    /// Human-readable warnings.
    pub warnings: Vec<String>,
}

impl BranchletDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn face_count(&self) -> usize {
        self.quad_count + self.triangle_count
    }

    /// Returns `true` if no warnings were recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Merges another diagnostics struct into this one.
    ///
    /// Counts are summed and warnings appended. `timing` from `other` is ignored.
    pub fn merge(&mut self, other: &BranchletDiagnostics) {
        self.branchlet_count += other.branchlet_count;
        self.vertex_count += other.vertex_count;
        self.uv_count += other.uv_count;
        self.quad_count += other.quad_count;
        self.triangle_count += other.triangle_count;
        self.degenerate_joint_count += other.degenerate_joint_count;
        self.warnings.extend(other.warnings.iter().cloned());
    }

    /// Short summary for logging: `"B:{branchlets} V:{vertices} F:{faces} [extras...]"`.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = vec![format!(
            "B:{} V:{} F:{}",
            self.branchlet_count,
            self.vertex_count,
            self.face_count()
        )];

        if self.degenerate_joint_count > 0 {
            parts.push(format!("merged-joints:{}", self.degenerate_joint_count));
        }
        if !self.warnings.is_empty() {
            parts.push(format!("warnings:{}", self.warnings.len()));
        }

        parts.join(" ")
    }
}

impl fmt::Display for BranchletDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Branchlet Diagnostics:")?;
        writeln!(f, "  Branchlets: {}", self.branchlet_count)?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  UVs: {}", self.uv_count)?;
        writeln!(f, "  Faces: {} ({} quads, {} triangles)", self.face_count(), self.quad_count, self.triangle_count)?;

        if self.degenerate_joint_count > 0 {
            writeln!(f, "  Merged joints: {}", self.degenerate_joint_count)?;
        }

        if !self.warnings.is_empty() {
            writeln!(f, "  Warnings:")?;
            for warning in &self.warnings {
                writeln!(f, "    - {warning}")?;
            }
        }

        if let Some(ref timing) = self.timing {
            writeln!(f, "  Timing: {} ms total", timing.total_ms())?;
        }

        Ok(())
    }
}
