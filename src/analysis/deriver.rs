use crate::analysis::{AnalysisConfig, HourlyPattern, NodeResult, ZoneSummary};
use crate::stats::NodeAccumulator;
use std::collections::HashMap;
use tracing::info;

/// Fixed position size, in MW, behind the net-profit estimate.
const POSITION_SIZE_MW: f64 = 10.0;

/// Ranked per-node results and per-zone roll-ups derived from the global
/// accumulator map.
///
/// Purely sequential: filter, derive, filter again, sort. The collections
/// are read-only once built; report writers consume them without mutating
/// core state.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    results: Vec<NodeResult>,
    zones: Vec<ZoneSummary>,
}

impl Analysis {
    /// Derive ranked results from finalized accumulators.
    ///
    /// Nodes below the sample-size floor are skipped before any metric is
    /// computed; nodes whose absolute mean spread does not strictly exceed
    /// the transaction cost are dropped afterwards. Survivors are sorted
    /// descending by Sharpe ratio, and zone summaries are rolled up from
    /// the survivors alone.
    pub fn derive(nodes: &HashMap<i32, NodeAccumulator>, config: &AnalysisConfig) -> Analysis {
        let mut results: Vec<NodeResult> = nodes
            .values()
            .filter(|acc| acc.count() >= config.min_sample_size)
            .filter_map(|acc| derive_node(acc, config))
            .collect();

        results.sort_by(|a, b| b.sharpe_ratio.total_cmp(&a.sharpe_ratio));

        let zones = summarize_zones(&results);

        info!(
            nodes_seen = nodes.len(),
            profitable_nodes = results.len(),
            zones = zones.len(),
            "metrics derived"
        );

        Analysis { results, zones }
    }

    /// Retained nodes, descending by Sharpe ratio.
    pub fn results(&self) -> &[NodeResult] {
        &self.results
    }

    /// Zone roll-ups, descending by average Sharpe ratio.
    pub fn zone_summaries(&self) -> &[ZoneSummary] {
        &self.zones
    }

    /// Secondary view of the retained nodes, descending by the
    /// congestion-component Sharpe ratio.
    pub fn by_congestion_sharpe(&self) -> Vec<&NodeResult> {
        let mut ranked: Vec<&NodeResult> = self.results.iter().collect();
        ranked.sort_by(|a, b| b.congestion_sharpe.total_cmp(&a.congestion_sharpe));
        ranked
    }
}

/// Mean over std, defined as 0 when the deviation carries no signal.
fn sharpe(mean: f64, std_dev: f64) -> f64 {
    if std_dev > 0.0 { mean / std_dev } else { 0.0 }
}

/// Compute one node's metrics; `None` when the node is not economically
/// tradeable after costs.
fn derive_node(acc: &NodeAccumulator, config: &AnalysisConfig) -> Option<NodeResult> {
    let count = acc.count() as f64;

    let mean_spread = acc.mean_spread();
    if mean_spread.abs() <= config.transaction_cost {
        return None;
    }

    let std_spread = acc.std_spread();
    let congestion_std = acc.congestion.std_dev(acc.count());
    let energy_std = acc.energy.std_dev(acc.count());

    let tradeable_spread = (mean_spread.abs() - config.transaction_cost).max(0.0);
    let net_profit_10mw = tradeable_spread * POSITION_SIZE_MW * count;

    let (best_hour, best_hour_avg) = best_hour(acc);

    Some(NodeResult {
        pnode_id: acc.pnode_id,
        zone: if acc.zone.is_empty() {
            "N/A".to_string()
        } else {
            acc.zone.clone()
        },
        sample_size: acc.count(),
        mean_spread,
        std_spread,
        sharpe_ratio: sharpe(mean_spread, std_spread),
        hit_rate: acc.positive_count as f64 / count,
        mean_abs_spread: acc.sum_abs_spread / count,
        congestion_mean: acc.congestion.mean,
        congestion_std,
        congestion_sharpe: sharpe(acc.congestion.mean, congestion_std),
        energy_mean: acc.energy.mean,
        energy_std,
        energy_sharpe: sharpe(acc.energy.mean, energy_std),
        best_hour,
        best_hour_avg,
        net_profit_10mw,
    })
}

/// Hour with the largest absolute average spread among hours with at
/// least one observation; hour 0 with average 0 when no hourly data
/// exists.
fn best_hour(acc: &NodeAccumulator) -> (usize, f64) {
    let mut best_hour = 0;
    let mut best_avg = 0.0f64;

    for hour in 0..24 {
        if acc.hourly_count[hour] > 0 {
            let avg = acc.hourly_sum[hour] / acc.hourly_count[hour] as f64;
            if avg.abs() > best_avg.abs() {
                best_hour = hour;
                best_avg = avg;
            }
        }
    }

    (best_hour, best_avg)
}

/// Group retained nodes by zone and rank zones by average member Sharpe.
fn summarize_zones(results: &[NodeResult]) -> Vec<ZoneSummary> {
    let mut grouped: HashMap<&str, (f64, u64, u64)> = HashMap::new();

    for result in results {
        let entry = grouped.entry(result.zone.as_str()).or_insert((0.0, 0, 0));
        entry.0 += result.sharpe_ratio;
        entry.1 += 1;
        entry.2 += result.sample_size;
    }

    let mut zones: Vec<ZoneSummary> = grouped
        .into_iter()
        .map(|(zone, (sharpe_sum, members, samples))| ZoneSummary {
            zone: zone.to_string(),
            avg_sharpe: sharpe_sum / members as f64,
            num_profitable_nodes: members,
            total_samples: samples,
        })
        .collect();

    zones.sort_by(|a, b| b.avg_sharpe.total_cmp(&a.avg_sharpe));
    zones
}

/// Hour-of-day aggregate across every node seen in the input, retained or
/// not.
pub fn hourly_profile(nodes: &HashMap<i32, NodeAccumulator>) -> Vec<HourlyPattern> {
    let mut sums = [0.0f64; 24];
    let mut counts = [0u64; 24];

    for acc in nodes.values() {
        for hour in 0..24 {
            sums[hour] += acc.hourly_sum[hour];
            counts[hour] += acc.hourly_count[hour];
        }
    }

    (0..24)
        .map(|hour| HourlyPattern {
            hour,
            avg_spread: if counts[hour] > 0 {
                sums[hour] / counts[hour] as f64
            } else {
                0.0
            },
            num_observations: counts[hour],
        })
        .collect()
}
