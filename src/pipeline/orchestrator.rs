use anyhow::{Context, Result};
use log::{debug, warn};
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::PipelineSummary;
use crate::utils::config::RESULT_CHANNEL_CAP;

use super::Enricher;
use super::context::{PipelineHandles, create_pipeline_channels};
use super::lines::LineSource;
use super::workers::spawn_workers;

/// Start the pool over `reader`. The caller receives from `result_rx` (or hands the handles
/// to [`drain_results`]) and must join `worker_handles` when done.
/// Line source → `num_workers` workers (enrich) → result channel.
pub fn run_pipeline<R, E>(reader: R, enricher: Arc<E>, num_workers: usize) -> PipelineHandles<R>
where
    R: BufRead + Send + 'static,
    E: Enricher + ?Sized + 'static,
{
    let num_workers = num_workers.max(1);
    debug!("Starting {} workers", num_workers);

    let channels = create_pipeline_channels(RESULT_CHANNEL_CAP);
    let source = Arc::new(LineSource::new(reader));

    let worker_handles = spawn_workers(
        &source,
        &enricher,
        &channels.result_tx,
        &channels.stats,
        num_workers,
    );

    // Dropping the last sender outside the workers: the channel now closes when the last
    // worker exits.
    drop(channels.result_tx);

    PipelineHandles {
        result_rx: channels.result_rx,
        worker_handles,
        stats: channels.stats,
        source,
    }
}

/// Join every worker. Workers absorb enricher panics, so a failed join is only logged.
fn shutdown_workers(worker_handles: Vec<JoinHandle<()>>) {
    for h in worker_handles {
        if h.join().is_err() {
            warn!("worker thread panicked");
        }
    }
}

/// Result sink: hand every status to `sink` as it arrives until the channel closes, then join
/// the workers. If `sink` fails the receiver is dropped, workers stop at their next send,
/// and the sink error is returned. A read error on the input is returned after all results
/// produced before it were delivered.
pub fn drain_results<R, F>(handles: PipelineHandles<R>, mut sink: F) -> Result<PipelineSummary>
where
    R: BufRead,
    F: FnMut(String) -> Result<()>,
{
    let PipelineHandles {
        result_rx,
        worker_handles,
        stats,
        source,
    } = handles;

    let mut sink_result = Ok(());
    while let Ok(status) = result_rx.recv() {
        if let Err(e) = sink(status) {
            sink_result = Err(e);
            break;
        }
    }
    drop(result_rx);
    shutdown_workers(worker_handles);
    sink_result?;

    let summary = stats.snapshot();
    debug!("Run finished: {}", summary);

    if let Some(err) = source.read_error() {
        anyhow::bail!("reading input stopped after {} lines: {}", source.lines_read(), err);
    }
    Ok(summary)
}

/// [`drain_results`] into a writer: one line per status, flushed immediately.
pub fn write_results<R, W>(handles: PipelineHandles<R>, writer: &mut W) -> Result<PipelineSummary>
where
    R: BufRead,
    W: Write,
{
    drain_results(handles, |status| {
        writeln!(writer, "{}", status).context("write status line")?;
        writer.flush().context("flush output")
    })
}
