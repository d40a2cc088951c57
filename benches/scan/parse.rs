use criterion::Criterion;
use lmpscan::SpreadRecord;
use std::hint::black_box;

fn sample_line(pnode_id: i32, spread: f64) -> String {
    let mut columns = vec!["2023-06-01".to_string(); 24];
    columns[7] = "10.5".to_string();
    columns[8] = "0.3".to_string();
    columns[9] = "20.1".to_string();
    columns[17] = "9.0".to_string();
    columns[18] = "0.4".to_string();
    columns[19] = "19.0".to_string();
    columns[20] = "2023-06-01 14:30:00".to_string();
    columns[21] = pnode_id.to_string();
    columns[22] = "ZONE_A".to_string();
    columns[23] = spread.to_string();
    columns.join(",")
}

/// Register all benchmarks for line parsing
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Record - Parse Lines");

    let line = sample_line(12345, 1.23);
    group.bench_function("parse_valid_line", |b| {
        b.iter(|| black_box(SpreadRecord::parse(black_box(&line))))
    });

    let short = "only,a,few,columns".to_string();
    group.bench_function("parse_short_line", |b| {
        b.iter(|| black_box(SpreadRecord::parse(black_box(&short))))
    });

    let lines: Vec<String> = (0..1000)
        .map(|i| sample_line(i, (i as f64 * 0.01).sin()))
        .collect();
    group.bench_function("parse_1000_lines", |b| {
        b.iter(|| {
            let mut valid = 0usize;
            for line in &lines {
                if SpreadRecord::parse(line).is_some() {
                    valid += 1;
                }
            }
            black_box(valid)
        })
    });

    group.finish();
}
