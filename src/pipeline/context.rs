//! Channels and handles passed between the pipeline driver and its caller.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::sync::Arc;
use std::thread::JoinHandle;

use super::lines::LineSource;
use super::stats::PipelineStats;

/// Result channel plus the shared counters. Workers get clones of `result_tx`;
/// the sink reads `result_rx`.
pub struct PipelineChannels {
    pub result_tx: Sender<String>,
    pub result_rx: Receiver<String>,
    pub stats: Arc<PipelineStats>,
}

pub fn create_pipeline_channels(channel_cap: usize) -> PipelineChannels {
    let (result_tx, result_rx) = bounded::<String>(channel_cap);
    PipelineChannels {
        result_tx,
        result_rx,
        stats: Arc::new(PipelineStats::new()),
    }
}

/// Handles returned by [`run_pipeline`](super::run_pipeline): receive results, then join.
/// `result_rx` closes once every worker has exited. `source` is kept so the caller can
/// check for a read error after the run.
pub struct PipelineHandles<R> {
    pub result_rx: Receiver<String>,
    pub worker_handles: Vec<JoinHandle<()>>,
    pub stats: Arc<PipelineStats>,
    pub source: Arc<LineSource<R>>,
}
