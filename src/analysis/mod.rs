mod config;
mod deriver;
mod results;

pub use config::{AnalysisConfig, DEFAULT_MIN_SAMPLE_SIZE, DEFAULT_TRANSACTION_COST};
pub use deriver::{Analysis, hourly_profile};
pub use results::{HourlyPattern, NodeResult, ZoneSummary};
