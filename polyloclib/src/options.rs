//! Options controlling a scan.

use crate::filter::ExcludePolicy;

/// Configuration for [`scan`](crate::scan).
///
/// Worker count defaults to the host's core count; a count of 1 degrades to
/// sequential processing with identical results.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Size of the worker pool (`None` = host core count)
    pub workers: Option<usize>,
    /// Exclusion policy applied before dispatch
    pub policy: ExcludePolicy,
}

impl ScanOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker pool size. Values below 1 are clamped to 1.
    pub fn workers(mut self, count: usize) -> Self {
        self.workers = Some(count.max(1));
        self
    }

    /// Set the exclusion policy.
    pub fn policy(mut self, policy: ExcludePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Effective pool size for this scan.
    pub fn effective_workers(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get).max(1)
    }
}
