//! Monitoring workflow over a [`Store`] and a [`LawRegistry`].
//!
//! [`Monitor`] owns no state of its own: every operation reads and writes
//! through the store, so several monitors (or processes) may share one.

mod actions;
mod changes;
mod dashboard;
mod error;
mod keywords;
mod laws;
mod sweep;

pub use changes::{ChangeView, ReviewOutcome, ReviewState};
pub use dashboard::{DashboardSnapshot, RECENT_LIMIT};
pub use error::WorkflowError;
pub use laws::{Promotion, TRACKED_SEARCH_LIMIT};
pub use sweep::{DetectionReport, SUMMARY_LINES, SweepFailure};

use std::sync::Arc;
use std::time::Duration;

use lawmonitor_registry::LawRegistry;
use lawmonitor_store::Store;

/// Tuning for the detection sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepConfig {
    /// Laws checked against the registry at the same time.
    pub concurrency: usize,
    /// Upper bound on a single registry lookup.
    pub gateway_timeout: Duration,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            gateway_timeout: Duration::from_secs(10),
        }
    }
}

/// Entry point for every workflow operation.
#[derive(Clone)]
pub struct Monitor {
    store: Arc<dyn Store>,
    registry: Arc<dyn LawRegistry>,
    config: SweepConfig,
}

impl Monitor {
    pub fn new(store: Arc<dyn Store>, registry: Arc<dyn LawRegistry>) -> Self {
        Self {
            store,
            registry,
            config: SweepConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SweepConfig) -> Self {
        self.config = config;
        self
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    pub fn registry(&self) -> &Arc<dyn LawRegistry> {
        &self.registry
    }

    pub fn config(&self) -> SweepConfig {
        self.config
    }
}

/// Trimmed text, or `None` when blank.
pub(crate) fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
