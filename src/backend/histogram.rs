//! Observation histogram with configurable bucket boundaries.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{MuninnError, Result};
use crate::traits::Metric;
use crate::types::{MetricKind, MetricValue};

use super::atomic_f64_add;

/// Default upper bounds, in seconds. Covers 5ms to 10s.
pub const DEFAULT_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Bucket upper bounds for a [`Histogram`].
///
/// This is the histogram's construction argument, forwarded by the
/// deduplicating registry only when the instance is first created. Bounds
/// must be finite and strictly ascending; validation happens when the
/// instance is built, and a rejection propagates out of
/// [`MetricRegistry::get`](crate::MetricRegistry::get) unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Buckets(Vec<f64>);

impl Buckets {
    /// Use the given upper bounds.
    pub fn new(bounds: Vec<f64>) -> Self {
        Self(bounds)
    }

    /// `count` bounds starting at `start`, each `width` apart.
    pub fn linear(start: f64, width: f64, count: usize) -> Self {
        Self((0..count).map(|i| start + width * i as f64).collect())
    }

    /// `count` bounds starting at `start`, each `factor` times the previous.
    pub fn exponential(start: f64, factor: f64, count: usize) -> Self {
        let mut bounds = Vec::with_capacity(count);
        let mut bound = start;
        for _ in 0..count {
            bounds.push(bound);
            bound *= factor;
        }
        Self(bounds)
    }

    /// The configured upper bounds, ascending.
    pub fn bounds(&self) -> &[f64] {
        &self.0
    }

    fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(MuninnError::InvalidBuckets("no upper bounds".into()));
        }
        if self.0.iter().any(|b| !b.is_finite()) {
            return Err(MuninnError::InvalidBuckets(
                "upper bounds must be finite".into(),
            ));
        }
        if !self.0.windows(2).all(|w| w[0] < w[1]) {
            return Err(MuninnError::InvalidBuckets(
                "upper bounds must be strictly ascending".into(),
            ));
        }
        Ok(())
    }
}

impl Default for Buckets {
    fn default() -> Self {
        Self(DEFAULT_BUCKETS.to_vec())
    }
}

/// Counts observations into configurable buckets.
///
/// An observation lands in the first bucket whose upper bound is greater
/// than or equal to the value; values above the last bound only count
/// toward the total.
#[derive(Debug)]
pub struct Histogram {
    bounds: Vec<f64>,
    // One slot per bound plus an overflow slot; non-cumulative internally,
    // accumulated at snapshot time.
    bucket_counts: Vec<AtomicU64>,
    sum_bits: AtomicU64,
    count: AtomicU64,
}

impl Histogram {
    /// Record one observation.
    pub fn observe(&self, value: f64) {
        let idx = self.bounds.partition_point(|&bound| bound < value);
        self.bucket_counts[idx].fetch_add(1, Ordering::Relaxed);
        atomic_f64_add(&self.sum_bits, value);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Total number of observations.
    pub fn sample_count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Sum of all observed values.
    pub fn sample_sum(&self) -> f64 {
        f64::from_bits(self.sum_bits.load(Ordering::Relaxed))
    }

    /// The configured upper bounds.
    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }
}

impl Metric for Histogram {
    type Args = Buckets;
    const KIND: MetricKind = MetricKind::Histogram;

    fn build(args: Buckets) -> Result<Self> {
        args.validate()?;
        let Buckets(bounds) = args;
        let bucket_counts = (0..bounds.len() + 1).map(|_| AtomicU64::new(0)).collect();
        Ok(Self {
            bounds,
            bucket_counts,
            sum_bits: AtomicU64::new(0),
            count: AtomicU64::new(0),
        })
    }

    fn value(&self) -> MetricValue {
        let mut cumulative_counts = Vec::with_capacity(self.bounds.len());
        let mut running = 0u64;
        for slot in &self.bucket_counts[..self.bounds.len()] {
            running += slot.load(Ordering::Relaxed);
            cumulative_counts.push(running);
        }
        MetricValue::Histogram {
            upper_bounds: self.bounds.clone(),
            cumulative_counts,
            sum: self.sample_sum(),
            count: self.sample_count(),
        }
    }
}
