use crossbeam_channel::Sender;
use log::debug;
use std::io::BufRead;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::{Outcome, SkipReason};

use super::Enricher;
use super::lines::LineSource;
use super::stats::PipelineStats;

/// Run the enricher on one line. A panic is absorbed into a skip so the worker keeps going.
fn enrich_line<E: Enricher + ?Sized>(enricher: &E, line: &str) -> Outcome {
    panic::catch_unwind(AssertUnwindSafe(|| enricher.enrich(line)))
        .unwrap_or(Outcome::Skipped(SkipReason::Panicked))
}

/// Single worker: pull lines from `source` until it is exhausted, send statuses on `result_tx`.
/// Stops early if the receiver is gone.
fn worker_loop<R, E>(
    source: Arc<LineSource<R>>,
    enricher: Arc<E>,
    result_tx: Sender<String>,
    stats: Arc<PipelineStats>,
) where
    R: BufRead,
    E: Enricher + ?Sized,
{
    while let Some(line) = source.next_line() {
        stats.record_attempt();
        match enrich_line(enricher.as_ref(), &line) {
            Outcome::Status(status) => {
                if result_tx.send(status).is_err() {
                    break;
                }
                stats.record_emitted();
            }
            Outcome::Skipped(reason) => {
                debug!("skip {:?}: {}", line, reason);
                stats.record_skip(reason);
            }
        }
    }
    drop(result_tx);
}

/// Spawn `num_workers` threads over one shared `source`. Each holds a clone of `result_tx`;
/// the caller must drop its own sender after this so the channel closes when the last
/// worker exits.
pub fn spawn_workers<R, E>(
    source: &Arc<LineSource<R>>,
    enricher: &Arc<E>,
    result_tx: &Sender<String>,
    stats: &Arc<PipelineStats>,
    num_workers: usize,
) -> Vec<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
    E: Enricher + ?Sized + 'static,
{
    (0..num_workers)
        .map(|_| {
            let source = Arc::clone(source);
            let enricher = Arc::clone(enricher);
            let result_tx = result_tx.clone();
            let stats = Arc::clone(stats);
            thread::spawn(move || worker_loop(source, enricher, result_tx, stats))
        })
        .collect()
}
