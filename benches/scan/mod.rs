mod aggregate;
mod parse;

use criterion::Criterion;

/// Register all scanner benchmarks
pub fn register_benchmarks(c: &mut Criterion) {
    parse::register_benchmarks(c);
    aggregate::register_benchmarks(c);
}
