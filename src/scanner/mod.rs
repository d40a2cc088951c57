use crate::analysis::{Analysis, AnalysisConfig};
use crate::errors::ScannerError;
use crate::stats::{AggregationEngine, NodeAccumulator};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything a scan produces: ranked analysis, the raw global
/// accumulator map behind it, and the row tallies.
#[derive(Debug)]
pub struct ScanReport {
    /// Ranked per-node results and zone roll-ups
    pub analysis: Analysis,
    /// Global accumulators for every node seen, retained or not
    pub nodes: HashMap<i32, NodeAccumulator>,
    /// Data lines read from the file, header excluded
    pub lines_read: u64,
    /// Rows successfully parsed and folded
    pub rows_folded: u64,
    /// Rows dropped as unparseable
    pub rows_dropped: u64,
    /// Thresholds the analysis was derived with
    pub config: AnalysisConfig,
}

impl ScanReport {
    /// Total observations across every node, retained or not.
    pub fn total_observations(&self) -> u64 {
        self.nodes.values().map(|acc| acc.count()).sum()
    }
}

/// Batch scanner: reads a delimited price file, aggregates it across the
/// worker pool and derives the ranked analysis.
///
/// An unreadable input file is the one fatal precondition failure; once
/// the lines are in hand the run always completes.
#[derive(Debug)]
pub struct Scanner {
    csv_path: PathBuf,
    config: AnalysisConfig,
    engine: AggregationEngine,
}

impl Scanner {
    /// Create a scanner for the given file and thresholds, with a worker
    /// pool sized to the available hardware parallelism.
    pub fn new(csv_path: impl Into<PathBuf>, config: AnalysisConfig) -> Self {
        Self {
            csv_path: csv_path.into(),
            config,
            engine: AggregationEngine::new(),
        }
    }

    /// Override the worker count, mainly for tests.
    pub fn with_engine(mut self, engine: AggregationEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Path of the input file.
    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    /// Run the full pipeline: read, aggregate, derive.
    pub fn run(&self) -> Result<ScanReport, ScannerError> {
        info!(path = %self.csv_path.display(), "starting scan");
        info!(
            transaction_cost = self.config.transaction_cost,
            min_sample_size = self.config.min_sample_size,
            "analysis thresholds"
        );

        let lines = self.read_data_lines()?;
        info!(rows = lines.len(), "file loaded");

        let outcome = self.engine.run(&lines);
        let analysis = Analysis::derive(&outcome.nodes, &self.config);

        Ok(ScanReport {
            analysis,
            nodes: outcome.nodes,
            lines_read: lines.len() as u64,
            rows_folded: outcome.rows_folded,
            rows_dropped: outcome.rows_dropped,
            config: self.config,
        })
    }

    /// Read the file into memory, discarding the header line.
    fn read_data_lines(&self) -> Result<Vec<String>, ScannerError> {
        let file = File::open(&self.csv_path).map_err(|error| ScannerError::IoError {
            message: format!("Cannot open CSV file {}: {error}", self.csv_path.display()),
        })?;

        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        // Header carries column names only
        if let Some(header) = lines.next() {
            header?;
        }

        let mut data = Vec::new();
        for line in lines {
            data.push(line?);
        }
        Ok(data)
    }
}
