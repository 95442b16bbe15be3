//! Pipeline components: line source, dedup claims, worker pool, result sink.

pub mod claims;
pub mod context;
pub mod lines;
pub mod orchestrator;
pub mod stats;
pub mod workers;

pub use claims::ClaimSet;
pub use context::{PipelineChannels, PipelineHandles, create_pipeline_channels};
pub use lines::LineSource;
pub use orchestrator::{drain_results, run_pipeline, write_results};
pub use stats::PipelineStats;
pub use workers::spawn_workers;

use crate::Outcome;

/// Per-line enrichment called from worker threads.
///
/// Must not fail outward: anything that goes wrong for a line is an
/// [`Outcome::Skipped`]. Implementations are shared across workers, so any mutable state
/// (such as a [`ClaimSet`]) must be internally synchronized.
pub trait Enricher: Send + Sync {
    fn enrich(&self, item: &str) -> Outcome;
}

impl<F> Enricher for F
where
    F: Fn(&str) -> Outcome + Send + Sync,
{
    fn enrich(&self, item: &str) -> Outcome {
        self(item)
    }
}
