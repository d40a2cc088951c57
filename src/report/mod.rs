//! Report writers for the scan results.
//!
//! Formatting lives entirely on this side of the boundary: the writers
//! consume the read-only, already-sorted collections exposed by the
//! analysis layer and never mutate core state. Each table has a rendering
//! function generic over [`io::Write`] plus a thin file wrapper.

use crate::analysis::hourly_profile;
use crate::errors::ScannerError;
use crate::scanner::ScanReport;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Ranked-node rows written to `node_rankings.csv`.
const NODE_RANKINGS_LIMIT: usize = 100;
/// Component rows written to `component_analysis.csv`.
const COMPONENT_LIMIT: usize = 50;
/// Rows of the top-nodes table inside the narrative report.
const SUMMARY_TOP_NODES: usize = 20;
/// Rows of the zone table inside the narrative report.
const SUMMARY_TOP_ZONES: usize = 10;
/// Span of the dataset assumed for the per-day profit estimate.
const ANALYSIS_WINDOW_DAYS: f64 = 90.0;

/// Write all five report artifacts into `dir`, creating it if needed.
pub fn write_all(report: &ScanReport, dir: &Path) -> Result<(), ScannerError> {
    std::fs::create_dir_all(dir)?;

    write_to_file(dir.join("node_rankings.csv"), |w| {
        render_node_rankings(w, report)
    })?;
    write_to_file(dir.join("zone_summary.csv"), |w| {
        render_zone_summary(w, report)
    })?;
    write_to_file(dir.join("component_analysis.csv"), |w| {
        render_component_analysis(w, report)
    })?;
    write_to_file(dir.join("hourly_patterns.csv"), |w| {
        render_hourly_patterns(w, report)
    })?;
    write_to_file(dir.join("summary_report.txt"), |w| {
        render_summary_report(w, report)
    })?;

    info!(dir = %dir.display(), "all report files written");
    Ok(())
}

fn write_to_file<F>(path: std::path::PathBuf, render: F) -> Result<(), ScannerError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    render(&mut writer)?;
    writer.flush()?;
    info!(file = %path.display(), "report written");
    Ok(())
}

/// Top nodes by Sharpe ratio, one CSV row per node.
pub fn render_node_rankings<W: Write>(w: &mut W, report: &ScanReport) -> io::Result<()> {
    writeln!(
        w,
        "pnode_id,zone,mean_spread,std_spread,sharpe_ratio,hit_rate,\
         sample_size,mean_abs_spread,net_profit_10mw,congestion_sharpe,\
         energy_sharpe,best_hour,best_hour_avg"
    )?;

    for result in report.analysis.results().iter().take(NODE_RANKINGS_LIMIT) {
        writeln!(
            w,
            "{},{},{:.4},{:.4},{:.4},{:.4},{},{:.4},{:.4},{:.4},{:.4},{},{:.4}",
            result.pnode_id,
            result.zone,
            result.mean_spread,
            result.std_spread,
            result.sharpe_ratio,
            result.hit_rate,
            result.sample_size,
            result.mean_abs_spread,
            result.net_profit_10mw,
            result.congestion_sharpe,
            result.energy_sharpe,
            result.best_hour,
            result.best_hour_avg
        )?;
    }
    Ok(())
}

/// Zone roll-up table, already sorted by average Sharpe.
pub fn render_zone_summary<W: Write>(w: &mut W, report: &ScanReport) -> io::Result<()> {
    writeln!(w, "zone,avg_sharpe,num_profitable_nodes,total_samples")?;

    for zone in report.analysis.zone_summaries() {
        writeln!(
            w,
            "{},{:.4},{},{}",
            zone.zone, zone.avg_sharpe, zone.num_profitable_nodes, zone.total_samples
        )?;
    }
    Ok(())
}

/// Congestion/energy decomposition for the top nodes by congestion
/// Sharpe.
pub fn render_component_analysis<W: Write>(w: &mut W, report: &ScanReport) -> io::Result<()> {
    writeln!(
        w,
        "pnode_id,zone,total_sharpe,congestion_mean,congestion_std,congestion_sharpe,\
         energy_mean,energy_std,energy_sharpe"
    )?;

    for result in report
        .analysis
        .by_congestion_sharpe()
        .iter()
        .take(COMPONENT_LIMIT)
    {
        writeln!(
            w,
            "{},{},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}",
            result.pnode_id,
            result.zone,
            result.sharpe_ratio,
            result.congestion_mean,
            result.congestion_std,
            result.congestion_sharpe,
            result.energy_mean,
            result.energy_std,
            result.energy_sharpe
        )?;
    }
    Ok(())
}

/// Hour-of-day aggregate across every node seen in the input.
pub fn render_hourly_patterns<W: Write>(w: &mut W, report: &ScanReport) -> io::Result<()> {
    writeln!(w, "hour,avg_spread,num_observations")?;

    for pattern in hourly_profile(&report.nodes) {
        writeln!(
            w,
            "{},{:.4},{}",
            pattern.hour, pattern.avg_spread, pattern.num_observations
        )?;
    }
    Ok(())
}

/// Narrative summary: dataset totals, top-node and zone tables, and a few
/// derived insights.
pub fn render_summary_report<W: Write>(w: &mut W, report: &ScanReport) -> io::Result<()> {
    let results = report.analysis.results();
    let zones = report.analysis.zone_summaries();

    writeln!(w, "LMP ARBITRAGE SCANNER - ANALYSIS RESULTS")?;
    writeln!(w)?;
    writeln!(w, "DATASET SUMMARY")?;
    writeln!(w, "Total nodes analyzed:        {}", report.nodes.len())?;
    writeln!(w, "Profitable nodes:            {}", results.len())?;
    writeln!(
        w,
        "Total observations:          {}",
        report.total_observations()
    )?;
    writeln!(
        w,
        "Rows dropped as unparseable: {}",
        report.rows_dropped
    )?;
    writeln!(
        w,
        "Transaction cost filter:     ${:.2}/MWh",
        report.config.transaction_cost
    )?;
    writeln!(w)?;

    writeln!(w, "TOP {SUMMARY_TOP_NODES} NODES BY SHARPE RATIO")?;
    writeln!(
        w,
        "{:>4} {:>10} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "#", "Node ID", "Zone", "Sharpe", "Mean $", "StdDev", "Hit%"
    )?;
    for (rank, result) in results.iter().take(SUMMARY_TOP_NODES).enumerate() {
        writeln!(
            w,
            "{:>4} {:>10} {:>8} {:>8.2} {:>8.2} {:>8.2} {:>7.1}%",
            rank + 1,
            result.pnode_id,
            result.zone,
            result.sharpe_ratio,
            result.mean_spread,
            result.std_spread,
            result.hit_rate * 100.0
        )?;
    }
    writeln!(w)?;

    writeln!(w, "ZONE RANKINGS")?;
    writeln!(
        w,
        "{:>4} {:>12} {:>10} {:>10}",
        "#", "Zone", "Avg Sharpe", "# Nodes"
    )?;
    for (rank, zone) in zones.iter().take(SUMMARY_TOP_ZONES).enumerate() {
        writeln!(
            w,
            "{:>4} {:>12} {:>10.2} {:>10}",
            rank + 1,
            zone.zone,
            zone.avg_sharpe,
            zone.num_profitable_nodes
        )?;
    }

    if !results.is_empty() {
        writeln!(w)?;
        writeln!(w, "KEY INSIGHTS")?;

        let congestion_sum: f64 = results.iter().map(|r| r.congestion_sharpe.abs()).sum();
        let energy_sum: f64 = results.iter().map(|r| r.energy_sharpe.abs()).sum();
        if congestion_sum + energy_sum > 0.0 {
            let congestion_share = congestion_sum / (congestion_sum + energy_sum) * 100.0;
            writeln!(
                w,
                "* Congestion component drives {congestion_share:.1}% of spread variance"
            )?;
        }

        let peak_hour = hourly_profile(&report.nodes)
            .into_iter()
            .filter(|p| p.num_observations > 0)
            .max_by(|a, b| a.avg_spread.abs().total_cmp(&b.avg_spread.abs()))
            .map(|p| p.hour)
            .unwrap_or(0);
        writeln!(w, "* Peak spread volatility at hour {peak_hour}:00")?;

        let total_profit: f64 = results.iter().map(|r| r.net_profit_10mw).sum();
        writeln!(
            w,
            "* Estimated profit (10MW positions): ${total_profit:.0} total (${:.0}/day avg)",
            total_profit / ANALYSIS_WINDOW_DAYS
        )?;
    }

    writeln!(w)?;
    writeln!(w, "Analysis complete. See CSV files for detailed results.")?;
    Ok(())
}
