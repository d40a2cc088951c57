use crate::record::SpreadRecord;
use crate::stats::NodeAccumulator;
use std::collections::HashMap;
use std::thread;
use tracing::{debug, info};

/// Result of one parallel aggregation pass.
#[derive(Debug, Default)]
pub struct AggregateOutcome {
    /// Global per-node accumulators after the merge phase
    pub nodes: HashMap<i32, NodeAccumulator>,
    /// Rows parsed and folded into an accumulator
    pub rows_folded: u64,
    /// Rows dropped because they could not be parsed
    pub rows_dropped: u64,
}

/// Folds raw data lines into per-node accumulators across a fixed pool of
/// worker threads.
///
/// The input is partitioned up front into contiguous chunks, one per
/// worker. Each worker parses and folds its chunk into a private
/// node-keyed map with no cross-worker visibility, so the hot loop runs
/// without any synchronization. Workers hand their finished maps back
/// through the scope join, and a single coordinator folds them into the
/// global map. Because [`NodeAccumulator::merge`] is associative and
/// commutative, the partitioning scheme affects only load balance and
/// rounding noise at the ULP level, never the counts.
#[derive(Debug, Clone, Copy)]
pub struct AggregationEngine {
    workers: usize,
}

impl AggregationEngine {
    /// Create an engine sized to the available hardware parallelism.
    pub fn new() -> Self {
        let workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self { workers }
    }

    /// Create an engine with an explicit worker count. A count of 0 is
    /// clamped to 1.
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Number of worker threads the engine will spawn.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Fold every parseable line into the global node map.
    ///
    /// Lines that fail to parse are dropped and tallied; they never abort
    /// the batch and never touch an accumulator.
    pub fn run(&self, lines: &[String]) -> AggregateOutcome {
        if lines.is_empty() {
            return AggregateOutcome::default();
        }

        let chunk_size = lines.len().div_ceil(self.workers);
        info!(
            workers = self.workers,
            rows = lines.len(),
            "starting parallel aggregation"
        );

        let locals: Vec<WorkerOutput> = thread::scope(|scope| {
            let handles: Vec<_> = lines
                .chunks(chunk_size)
                .map(|chunk| scope.spawn(move || fold_chunk(chunk)))
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().expect("aggregation worker panicked"))
                .collect()
        });

        let mut outcome = AggregateOutcome::default();
        for local in locals {
            outcome.rows_folded += local.rows_folded;
            outcome.rows_dropped += local.rows_dropped;

            for (pnode_id, accumulator) in local.nodes {
                outcome
                    .nodes
                    .entry(pnode_id)
                    .and_modify(|global| global.merge(&accumulator))
                    .or_insert(accumulator);
            }
        }

        info!(
            rows_folded = outcome.rows_folded,
            rows_dropped = outcome.rows_dropped,
            unique_nodes = outcome.nodes.len(),
            "aggregation complete"
        );
        outcome
    }
}

impl Default for AggregationEngine {
    fn default() -> Self {
        Self::new()
    }
}

struct WorkerOutput {
    nodes: HashMap<i32, NodeAccumulator>,
    rows_folded: u64,
    rows_dropped: u64,
}

/// Sequential fold of one worker's chunk into its private map.
fn fold_chunk(lines: &[String]) -> WorkerOutput {
    let mut nodes: HashMap<i32, NodeAccumulator> = HashMap::new();
    let mut rows_folded = 0u64;
    let mut rows_dropped = 0u64;

    for line in lines {
        let Some(record) = SpreadRecord::parse(line) else {
            rows_dropped += 1;
            continue;
        };

        nodes.entry(record.pnode_id).or_default().update(
            record.spread,
            record.congestion_spread(),
            record.energy_spread(),
            record.hour,
            record.zone,
            record.pnode_id,
        );
        rows_folded += 1;
    }

    debug!(
        rows_folded,
        rows_dropped,
        nodes = nodes.len(),
        "worker chunk folded"
    );

    WorkerOutput {
        nodes,
        rows_folded,
        rows_dropped,
    }
}
