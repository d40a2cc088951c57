use crate::errors::ScannerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Derived arbitrage metrics for one node that cleared both the
/// sample-size and profitability filters.
///
/// Read-only after creation; owned by the results list until report
/// writing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeResult {
    /// Priced-node identifier
    pub pnode_id: i32,
    /// Zone code, "N/A" when the input carried none
    pub zone: String,
    /// Number of observations behind the estimates
    pub sample_size: u64,

    /// Mean spread per observation
    pub mean_spread: f64,
    /// Population standard deviation of the spread
    pub std_spread: f64,
    /// Mean divided by standard deviation; 0 when the deviation is 0
    pub sharpe_ratio: f64,
    /// Fraction of observations with a strictly positive spread
    pub hit_rate: f64,
    /// Mean absolute spread
    pub mean_abs_spread: f64,

    /// Mean congestion spread
    pub congestion_mean: f64,
    /// Standard deviation of the congestion spread
    pub congestion_std: f64,
    /// Signal-to-noise ratio of the congestion component
    pub congestion_sharpe: f64,
    /// Mean energy spread
    pub energy_mean: f64,
    /// Standard deviation of the energy spread
    pub energy_std: f64,
    /// Signal-to-noise ratio of the energy component
    pub energy_sharpe: f64,

    /// Hour of day with the largest absolute average spread
    pub best_hour: usize,
    /// Average spread during the best hour
    pub best_hour_avg: f64,

    /// Estimated profit for a fixed 10 MW position after netting the
    /// transaction cost from the mean spread
    pub net_profit_10mw: f64,
}

/// Roll-up of retained nodes for one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSummary {
    /// Zone code
    pub zone: String,
    /// Unweighted average Sharpe ratio of member nodes
    pub avg_sharpe: f64,
    /// Number of member nodes that cleared the profitability filter
    pub num_profitable_nodes: u64,
    /// Total observations across member nodes
    pub total_samples: u64,
}

/// Average spread and observation count for one hour of day, aggregated
/// across every node seen in the input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyPattern {
    /// Hour of day, 0 through 23
    pub hour: usize,
    /// Average spread across all observations in this hour
    pub avg_spread: f64,
    /// Number of observations in this hour
    pub num_observations: u64,
}

impl fmt::Display for ZoneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ZoneSummary:zone={};avg_sharpe={};num_profitable_nodes={};total_samples={}",
            self.zone, self.avg_sharpe, self.num_profitable_nodes, self.total_samples
        )
    }
}

impl FromStr for ZoneSummary {
    type Err = ScannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix("ZoneSummary:")
            .ok_or(ScannerError::InvalidFormat)?;

        let mut fields = std::collections::HashMap::new();
        for field_pair in rest.split(';') {
            let kv: Vec<&str> = field_pair.split('=').collect();
            if kv.len() == 2 {
                fields.insert(kv[0], kv[1]);
            }
        }

        let get_field = |field: &str| -> Result<&str, ScannerError> {
            match fields.get(field) {
                Some(value) => Ok(*value),
                None => Err(ScannerError::MissingField(field.to_string())),
            }
        };

        let parse_f64 = |field: &str, value: &str| -> Result<f64, ScannerError> {
            value
                .parse::<f64>()
                .map_err(|_| ScannerError::InvalidFieldValue {
                    field: field.to_string(),
                    value: value.to_string(),
                })
        };

        let parse_u64 = |field: &str, value: &str| -> Result<u64, ScannerError> {
            value
                .parse::<u64>()
                .map_err(|_| ScannerError::InvalidFieldValue {
                    field: field.to_string(),
                    value: value.to_string(),
                })
        };

        let zone = get_field("zone")?.to_string();
        let avg_sharpe = parse_f64("avg_sharpe", get_field("avg_sharpe")?)?;
        let num_profitable_nodes =
            parse_u64("num_profitable_nodes", get_field("num_profitable_nodes")?)?;
        let total_samples = parse_u64("total_samples", get_field("total_samples")?)?;

        Ok(ZoneSummary {
            zone,
            avg_sharpe,
            num_profitable_nodes,
            total_samples,
        })
    }
}

impl fmt::Display for NodeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NodeResult:pnode_id={};zone={};sharpe_ratio={:.4};mean_spread={:.4};std_spread={:.4};hit_rate={:.4};sample_size={}",
            self.pnode_id,
            self.zone,
            self.sharpe_ratio,
            self.mean_spread,
            self.std_spread,
            self.hit_rate,
            self.sample_size
        )
    }
}
