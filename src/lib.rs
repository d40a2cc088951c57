//! # lmpscan
//!
//! A concurrent streaming-statistics scanner for locational marginal price (LMP) data. The crate ingests a large delimited file of day-ahead and real-time price components, computes robust per-node arbitrage statistics in a single pass, and ranks nodes and zones by the risk-adjusted persistence of their price spreads.
//!
//! ## Features
//!
//! - Zero-copy, fixed-offset line parsing tuned for the LMP record layout
//! - Numerically stable one-pass mean and variance via Welford's online algorithm
//! - Thread-partitioned aggregation: each worker folds into a private map, a single coordinator merges the partial aggregates
//! - Order-independent merge of partial statistics using the parallel-variance combination formula
//! - Congestion versus energy decomposition of every spread series
//! - Hit rates, extrema, hour-of-day buckets and a best-trading-hour estimate per node
//! - Sharpe-style signal-to-noise ranking with sample-size and transaction-cost filters
//! - Zone roll-ups with unweighted average Sharpe and sample totals
//! - Five report artifacts: ranked nodes, zone summary, component decomposition, hourly patterns and a narrative summary
//!
//! ## Pipeline
//!
//! Raw lines flow through [`SpreadRecord::parse`] into typed records, are
//! sharded across a fixed worker pool by the [`AggregationEngine`], folded
//! into per-node [`NodeAccumulator`]s, merged into one global map, and
//! finally ranked by [`Analysis::derive`]. The [`Scanner`] ties the stages
//! together for file input, and the [`report`] module formats the results.
//!
//! Malformed rows are dropped with a tally and never abort a batch; the
//! only fatal failure is an unreadable input file.
//!
//! ## Example
//!
//! ```no_run
//! use lmpscan::{AnalysisConfig, Scanner};
//!
//! let scanner = Scanner::new("lmp_data_merged.csv", AnalysisConfig::default());
//! let report = scanner.run().expect("scan failed");
//! for result in report.analysis.results().iter().take(10) {
//!     println!("{result}");
//! }
//! ```

mod analysis;
mod errors;
mod record;
pub mod report;
mod scanner;
mod stats;
mod utils;

pub use analysis::{
    Analysis, AnalysisConfig, DEFAULT_MIN_SAMPLE_SIZE, DEFAULT_TRANSACTION_COST, HourlyPattern,
    NodeResult, ZoneSummary, hourly_profile,
};
pub use errors::ScannerError;
pub use record::{FieldCursor, MAX_ZONE_LEN, SpreadRecord};
pub use scanner::{ScanReport, Scanner};
pub use stats::{AggregateOutcome, AggregationEngine, Moments, NodeAccumulator};
pub use utils::setup_logger;
