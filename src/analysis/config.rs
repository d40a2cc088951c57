use serde::{Deserialize, Serialize};

/// Default per-unit transaction cost, in currency units per MWh.
pub const DEFAULT_TRANSACTION_COST: f64 = 0.75;

/// Default minimum number of observations before a node's variance
/// estimate is trusted.
pub const DEFAULT_MIN_SAMPLE_SIZE: u64 = 500;

/// Filtering thresholds applied when deriving ranked results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Per-unit transaction cost netted from the mean spread. A node is
    /// retained only if its absolute mean spread strictly exceeds this.
    pub transaction_cost: f64,
    /// Nodes with fewer observations than this are skipped entirely.
    pub min_sample_size: u64,
}

impl AnalysisConfig {
    /// Config with the default sample-size floor and a custom cost.
    pub fn with_transaction_cost(transaction_cost: f64) -> Self {
        Self {
            transaction_cost,
            ..Self::default()
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            transaction_cost: DEFAULT_TRANSACTION_COST,
            min_sample_size: DEFAULT_MIN_SAMPLE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::analysis::AnalysisConfig;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.transaction_cost, 0.75);
        assert_eq!(config.min_sample_size, 500);
    }

    #[test]
    fn test_with_transaction_cost() {
        let config = AnalysisConfig::with_transaction_cost(1.25);
        assert_eq!(config.transaction_cost, 1.25);
        assert_eq!(config.min_sample_size, 500);
    }

    #[test]
    fn test_serde_round_trip() {
        let config = AnalysisConfig::with_transaction_cost(0.5);
        let json = serde_json::to_string(&config).unwrap();
        let back: AnalysisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
