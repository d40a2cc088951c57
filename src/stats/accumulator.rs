use serde::{Deserialize, Serialize};

/// Running mean and sum of squared deviations for one series.
///
/// The observation count lives on the owning accumulator, since all three
/// tracked series advance in lockstep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    /// Running mean of the series
    pub mean: f64,
    /// Sum of squared deviations from the running mean (Welford's M2)
    pub m2: f64,
}

impl Moments {
    /// Fold one observation in, using Welford's online update.
    ///
    /// `count` is the number of observations including `value`.
    pub fn push(&mut self, count: u64, value: f64) {
        let delta = value - self.mean;
        self.mean += delta / count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    /// Combine with the moments of a disjoint partition of the same
    /// series, using the parallel-variance formula.
    ///
    /// `count` and `other_count` are the observation counts behind `self`
    /// and `other`. Combining with an empty partition on either side is an
    /// identity and never divides by zero.
    pub fn combine(&mut self, count: u64, other: &Moments, other_count: u64) {
        if other_count == 0 {
            return;
        }
        if count == 0 {
            *self = *other;
            return;
        }

        let n1 = count as f64;
        let n2 = other_count as f64;
        let total = n1 + n2;
        let delta = other.mean - self.mean;

        self.mean = (n1 * self.mean + n2 * other.mean) / total;
        self.m2 += other.m2 + delta * delta * n1 * n2 / total;
    }

    /// Population variance (M2 / n); 0 for an empty series.
    pub fn variance(&self, count: u64) -> f64 {
        if count == 0 { 0.0 } else { self.m2 / count as f64 }
    }

    /// Population standard deviation.
    pub fn std_dev(&self, count: u64) -> f64 {
        self.variance(count).sqrt()
    }
}

/// Per-node running statistics over every valid observation seen.
///
/// Welford moments are kept independently for the total spread and its
/// congestion and energy components, alongside hit counts, extrema and
/// 24 hour-of-day buckets. During the parallel fold each accumulator is
/// owned exclusively by one worker; the merge phase combines same-node
/// accumulators from different workers with [`NodeAccumulator::merge`],
/// which is associative and commutative up to floating-point rounding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeAccumulator {
    /// Number of observations folded in
    pub count: u64,
    /// Moments of the total spread
    pub spread: Moments,
    /// Moments of the congestion spread
    pub congestion: Moments,
    /// Moments of the energy spread
    pub energy: Moments,
    /// Sum of absolute spreads
    pub sum_abs_spread: f64,
    /// Number of observations with a strictly positive spread
    pub positive_count: u64,
    /// Largest spread seen
    pub max_spread: f64,
    /// Smallest spread seen
    pub min_spread: f64,
    /// Per-hour spread sums; hours outside [0, 23] are discarded
    pub hourly_sum: [f64; 24],
    /// Per-hour observation counts
    pub hourly_count: [u64; 24],
    /// Zone code recorded on the first update (sticky)
    pub zone: String,
    /// Node id recorded on the first update (sticky)
    pub pnode_id: i32,
}

impl NodeAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self {
            count: 0,
            spread: Moments::default(),
            congestion: Moments::default(),
            energy: Moments::default(),
            sum_abs_spread: 0.0,
            positive_count: 0,
            max_spread: f64::NEG_INFINITY,
            min_spread: f64::INFINITY,
            hourly_sum: [0.0; 24],
            hourly_count: [0; 24],
            zone: String::new(),
            pnode_id: 0,
        }
    }

    /// Incorporate one observation.
    ///
    /// The zone and node id stick from the first update; later updates for
    /// the same key carry the same values by construction and are not
    /// re-validated. An hour outside [0, 23] is excluded from the hourly
    /// buckets but still counted in the main series.
    pub fn update(
        &mut self,
        spread: f64,
        congestion_spread: f64,
        energy_spread: f64,
        hour: i32,
        zone: &str,
        pnode_id: i32,
    ) {
        self.count += 1;

        if self.count == 1 {
            self.zone = zone.to_string();
            self.pnode_id = pnode_id;
        }

        self.spread.push(self.count, spread);
        self.congestion.push(self.count, congestion_spread);
        self.energy.push(self.count, energy_spread);

        self.sum_abs_spread += spread.abs();
        if spread > 0.0 {
            self.positive_count += 1;
        }

        self.max_spread = self.max_spread.max(spread);
        self.min_spread = self.min_spread.min(spread);

        if (0..24).contains(&hour) {
            self.hourly_sum[hour as usize] += spread;
            self.hourly_count[hour as usize] += 1;
        }
    }

    /// Combine with another accumulator for the same node.
    ///
    /// Moments combine with the parallel-variance formula; sums, counts
    /// and hourly buckets combine by addition, extrema by min/max. Merging
    /// an empty accumulator into a populated one (or the reverse) yields
    /// exactly the populated one.
    pub fn merge(&mut self, other: &NodeAccumulator) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other.clone();
            return;
        }

        self.spread.combine(self.count, &other.spread, other.count);
        self.congestion
            .combine(self.count, &other.congestion, other.count);
        self.energy.combine(self.count, &other.energy, other.count);

        self.count += other.count;
        self.sum_abs_spread += other.sum_abs_spread;
        self.positive_count += other.positive_count;
        self.max_spread = self.max_spread.max(other.max_spread);
        self.min_spread = self.min_spread.min(other.min_spread);

        for hour in 0..24 {
            self.hourly_sum[hour] += other.hourly_sum[hour];
            self.hourly_count[hour] += other.hourly_count[hour];
        }
    }

    /// Number of observations folded in.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean spread per observation.
    pub fn mean_spread(&self) -> f64 {
        self.spread.mean
    }

    /// Population standard deviation of the spread.
    pub fn std_spread(&self) -> f64 {
        self.spread.std_dev(self.count)
    }
}

impl Default for NodeAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
