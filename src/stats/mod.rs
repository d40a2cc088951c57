mod accumulator;
mod engine;

pub use accumulator::{Moments, NodeAccumulator};
pub use engine::{AggregateOutcome, AggregationEngine};
