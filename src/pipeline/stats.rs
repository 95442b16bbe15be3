//! Per-run counters shared by workers. The observability hook for silent skips.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::types::SKIP_REASON_COUNT;
use crate::{PipelineSummary, SkipReason};

#[derive(Debug, Default)]
pub struct PipelineStats {
    attempted: AtomicUsize,
    emitted: AtomicUsize,
    skipped: [AtomicUsize; SKIP_REASON_COUNT],
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_attempt(&self) {
        self.attempted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_emitted(&self) {
        self.emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skip(&self, reason: SkipReason) {
        self.skipped[reason.index()].fetch_add(1, Ordering::Relaxed);
    }

    /// Counters as of now. Exact once all workers have been joined.
    pub fn snapshot(&self) -> PipelineSummary {
        let mut summary = PipelineSummary {
            attempted: self.attempted.load(Ordering::Relaxed),
            emitted: self.emitted.load(Ordering::Relaxed),
            ..Default::default()
        };
        for reason in SkipReason::ALL {
            summary.skipped[reason.index()] = self.skipped[reason.index()].load(Ordering::Relaxed);
        }
        summary
    }
}
