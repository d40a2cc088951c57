use lmpscan::{AggregationEngine, Analysis, AnalysisConfig, NodeAccumulator, SpreadRecord};

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn data_line(pnode_id: i32, zone: &str, spread: f64, cong_da: f64, hour: u32) -> String {
        let mut columns = vec!["filler".to_string(); 24];
        columns[7] = cong_da.to_string();
        columns[8] = "0.1".to_string();
        columns[9] = "20.0".to_string();
        columns[17] = "9.0".to_string();
        columns[18] = "0.2".to_string();
        columns[19] = "19.0".to_string();
        columns[20] = format!("2023-06-01 {hour:02}:15:00");
        columns[21] = pnode_id.to_string();
        columns[22] = zone.to_string();
        columns[23] = spread.to_string();
        columns.join(",")
    }

    #[test]
    fn test_parse_reference_line() {
        let line = data_line(12345, "ZONE_A", 1.23, 10.5, 14);
        let record = SpreadRecord::parse(&line).unwrap();

        assert_eq!(record.pnode_id, 12345);
        assert_eq!(record.zone, "ZONE_A");
        assert_eq!(record.hour, 14);
        assert_eq!(record.spread, 1.23);
        assert!((record.congestion_spread() - 1.5).abs() < 1e-12);
        assert!((record.energy_spread() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pipeline_lines_to_ranked_results() {
        let mut lines = Vec::new();
        for i in 0..600 {
            let wobble = if i % 2 == 0 { 0.4 } else { -0.4 };
            // Node 900: strong persistent signal across two zones' worth of rows
            lines.push(data_line(900, "WEST", 2.5 + wobble, 10.0, i % 24));
            // Node 901: mean below the transaction cost, filtered out
            lines.push(data_line(901, "EAST", 0.5 + wobble, 10.0, i % 24));
        }
        lines.push("short,row".to_string());

        let outcome = AggregationEngine::with_workers(4).run(&lines);
        assert_eq!(outcome.rows_folded, 1200);
        assert_eq!(outcome.rows_dropped, 1);

        let analysis = Analysis::derive(&outcome.nodes, &AnalysisConfig::default());
        let results = analysis.results();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].pnode_id, 900);
        assert_eq!(results[0].sample_size, 600);
        assert!((results[0].mean_spread - 2.5).abs() < 1e-9);
        assert!((results[0].std_spread - 0.4).abs() < 1e-9);
        assert!((results[0].sharpe_ratio - 6.25).abs() < 1e-6);

        let zones = analysis.zone_summaries();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].zone, "WEST");
        assert_eq!(zones[0].total_samples, 600);
    }

    #[test]
    fn test_merge_associativity_across_partitions() {
        let lines: Vec<String> = (0..300)
            .map(|i| {
                let spread = ((i as f64) * 0.13).sin() * 4.0;
                data_line(55, "MIDDLE", spread, 10.0 + (i % 3) as f64, i % 24)
            })
            .collect();

        let reference = AggregationEngine::with_workers(1).run(&lines);
        for workers in [2, 3, 8, 13] {
            let outcome = AggregationEngine::with_workers(workers).run(&lines);
            let a: &NodeAccumulator = &reference.nodes[&55];
            let b: &NodeAccumulator = &outcome.nodes[&55];

            assert_eq!(a.count(), b.count(), "workers={workers}");
            assert!((a.mean_spread() - b.mean_spread()).abs() < 1e-9);
            assert!((a.std_spread() - b.std_spread()).abs() < 1e-9);
            assert_eq!(a.positive_count, b.positive_count);
            assert_eq!(a.hourly_count, b.hourly_count);
        }
    }

    #[test]
    fn test_malformed_rows_do_not_corrupt_neighbors() {
        let mut lines = vec![
            data_line(1, "A", 2.0, 10.0, 6),
            data_line(1, "A", 2.0, 10.0, 6),
        ];
        lines.push(data_line(1, "A", 2.0, 10.0, 6).replace("20.0", "oops"));
        lines.push(data_line(2, "B", 1.0, 10.0, 7));

        let outcome = AggregationEngine::with_workers(2).run(&lines);

        assert_eq!(outcome.rows_dropped, 1);
        assert_eq!(outcome.nodes[&1].count(), 2);
        assert_eq!(outcome.nodes[&2].count(), 1);
    }

    #[test]
    fn test_constant_spread_yields_zero_sharpe() {
        let lines: Vec<String> = (0..600)
            .map(|i| data_line(77, "FLAT", 5.0, 10.0, i % 24))
            .collect();

        let outcome = AggregationEngine::with_workers(3).run(&lines);
        let analysis = Analysis::derive(&outcome.nodes, &AnalysisConfig::default());

        let result = &analysis.results()[0];
        assert_eq!(result.std_spread, 0.0);
        assert_eq!(result.sharpe_ratio, 0.0);
        assert!(result.sharpe_ratio.is_finite());
    }
}
