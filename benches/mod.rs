use criterion::{criterion_group, criterion_main};

mod scan;

use scan::register_benchmarks as register_scan_benchmarks;

criterion_group!(benches, register_scan_benchmarks);

criterion_main!(benches);
