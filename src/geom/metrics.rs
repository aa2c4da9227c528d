//! Opt-in timing hooks for the branchlet builder.
//!
//! Timing is only collected when the `branchlet_metrics` feature is enabled and
//! the target is not WASM (`std::time::Instant` is unavailable there). Otherwise
//! every call compiles to a plain closure invocation.
//!
//! ```ignore
//! let mut metrics = BranchletMetrics::default();
//! metrics.begin();
//! let merged = metrics.time(TimingBucket::Vertices, || push_vertices());
//! if let Some(report) = metrics.end() {
//!     println!("vertices: {} ns", report.vertices_ns);
//! }
//! ```

/// Build stages that can be timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingBucket {
    /// Ellipse fitting and ring sampling.
    Vertices,
    /// Face counts and face vertex indices.
    Connectivity,
    /// UV coordinates and UV indices.
    Uvs,
    /// Merging independently built buffer sets.
    Merge,
}

/// Cumulative nanoseconds per build stage.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BranchletTimingReport {
    pub vertices_ns: u64,
    pub connectivity_ns: u64,
    pub uvs_ns: u64,
    pub merge_ns: u64,
}

impl BranchletTimingReport {
    #[must_use]
    pub fn total_ns(&self) -> u64 {
        self.vertices_ns
            .saturating_add(self.connectivity_ns)
            .saturating_add(self.uvs_ns)
            .saturating_add(self.merge_ns)
    }

    /// Returns the total time in milliseconds (for display purposes).
    #[must_use]
    pub fn total_ms(&self) -> f64 {
        self.total_ns() as f64 / 1_000_000.0
    }

    pub fn accumulate(&mut self, other: &BranchletTimingReport) {
        self.vertices_ns = self.vertices_ns.saturating_add(other.vertices_ns);
        self.connectivity_ns = self.connectivity_ns.saturating_add(other.connectivity_ns);
        self.uvs_ns = self.uvs_ns.saturating_add(other.uvs_ns);
        self.merge_ns = self.merge_ns.saturating_add(other.merge_ns);
    }
}

/// Accumulator for timing build stages.
///
/// When the `branchlet_metrics` feature is disabled (or on WASM), all methods
/// are no-ops and [`end`](Self::end) returns `None`.
#[derive(Debug, Default)]
pub struct BranchletMetrics {
    #[cfg(all(feature = "branchlet_metrics", not(target_arch = "wasm32")))]
    report: BranchletTimingReport,
}

impl BranchletMetrics {
    /// Resets all timing counters to zero.
    pub fn begin(&mut self) {
        #[cfg(all(feature = "branchlet_metrics", not(target_arch = "wasm32")))]
        {
            self.report = BranchletTimingReport::default();
        }
    }

    /// Returns the accumulated timing report, or `None` if metrics are disabled.
    #[must_use]
    pub fn end(&self) -> Option<BranchletTimingReport> {
        #[cfg(all(feature = "branchlet_metrics", not(target_arch = "wasm32")))]
        {
            Some(self.report.clone())
        }
        #[cfg(not(all(feature = "branchlet_metrics", not(target_arch = "wasm32"))))]
        {
            None
        }
    }

    /// Times `f` and adds the elapsed time to `bucket`.
    pub fn time<R>(&mut self, bucket: TimingBucket, f: impl FnOnce() -> R) -> R {
        #[cfg(all(feature = "branchlet_metrics", not(target_arch = "wasm32")))]
        {
            let start = std::time::Instant::now();
            let result = f();
            let nanos = start.elapsed().as_nanos().min(u128::from(u64::MAX)) as u64;
            self.add_to_bucket(bucket, nanos);
            result
        }

        #[cfg(not(all(feature = "branchlet_metrics", not(target_arch = "wasm32"))))]
        {
            let _ = bucket;
            f()
        }
    }

    #[cfg(all(feature = "branchlet_metrics", not(target_arch = "wasm32")))]
    fn add_to_bucket(&mut self, bucket: TimingBucket, nanos: u64) {
        let slot = match bucket {
            TimingBucket::Vertices => &mut self.report.vertices_ns,
            TimingBucket::Connectivity => &mut self.report.connectivity_ns,
            TimingBucket::Uvs => &mut self.report.uvs_ns,
            TimingBucket::Merge => &mut self.report.merge_ns,
        };
        *slot = slot.saturating_add(nanos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_report_total() {
        let report = BranchletTimingReport {
            vertices_ns: 1000,
            connectivity_ns: 2000,
            uvs_ns: 3000,
            merge_ns: 0,
        };
        assert_eq!(report.total_ns(), 6000);
        assert!((report.total_ms() - 0.006).abs() < 1e-9);
    }

    #[test]
    fn test_accumulate_saturates() {
        let mut report = BranchletTimingReport {
            vertices_ns: u64::MAX - 1,
            ..Default::default()
        };
        report.accumulate(&BranchletTimingReport {
            vertices_ns: 10,
            uvs_ns: 5,
            ..Default::default()
        });
        assert_eq!(report.vertices_ns, u64::MAX);
        assert_eq!(report.uvs_ns, 5);
    }

    #[test]
    fn test_time_returns_closure_result() {
        let mut metrics = BranchletMetrics::default();
        metrics.begin();
        let result = metrics.time(TimingBucket::Uvs, || 42);
        assert_eq!(result, 42);
        let _ = metrics.end();
    }
}
