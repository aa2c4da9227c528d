mod branchlets;
mod buffers;
mod connectivity;
mod core;
mod diagnostics;
mod ellipse;
mod export;
mod metrics;
mod ring;
mod segment;
mod uv;
mod vertices;

pub use branchlets::{BranchletError, BranchletMode, BranchletOptions, Branchlets};
pub use buffers::{MIN_BUILDABLE_VERTICES, MeshBuffers, MeshExport};
pub use self::core::{Point3, Tolerance, Vec3};
pub use diagnostics::BranchletDiagnostics;
pub use ellipse::{
    EllipseAxes, JOINT_SLACK, JointFit, fit_joint_ellipse, fit_segment_ellipse, merged_segment,
};
pub use export::{SNAPSHOT_DECIMALS, write_obj, write_snapshot};
pub use metrics::{BranchletMetrics, BranchletTimingReport, TimingBucket};
pub use ring::{push_ring, vector_polar};
pub use segment::{Segment, Skeleton};
pub use uv::v_scaler;

#[cfg(test)]
mod tests;
