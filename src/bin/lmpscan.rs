use lmpscan::{AnalysisConfig, Scanner, report, setup_logger};
use std::path::Path;
use std::time::Instant;
use tracing::{error, info};

const DEFAULT_CSV_PATH: &str = "lmp_data_merged.csv";
const OUTPUT_DIR: &str = "output";

fn main() {
    setup_logger();

    let mut args = std::env::args().skip(1);
    let csv_path = args.next().unwrap_or_else(|| DEFAULT_CSV_PATH.to_string());

    let config = match args.next() {
        Some(cost) => match cost.parse::<f64>() {
            Ok(cost) => AnalysisConfig::with_transaction_cost(cost),
            Err(_) => {
                error!("Invalid transaction cost: {cost}");
                std::process::exit(1);
            }
        },
        None => AnalysisConfig::default(),
    };

    info!("LMP Arbitrage Scanner");

    let start = Instant::now();
    let scanner = Scanner::new(&csv_path, config);

    let scan = scanner.run().and_then(|scan_report| {
        report::write_all(&scan_report, Path::new(OUTPUT_DIR))?;
        Ok(scan_report)
    });

    match scan {
        Ok(scan_report) => {
            info!(
                rows_folded = scan_report.rows_folded,
                rows_dropped = scan_report.rows_dropped,
                profitable_nodes = scan_report.analysis.results().len(),
                "scan finished"
            );
            info!("Total runtime: {:?}", start.elapsed());
        }
        Err(err) => {
            error!("Error: {err}");
            std::process::exit(1);
        }
    }
}
