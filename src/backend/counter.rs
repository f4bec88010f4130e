//! Monotonic counter instance.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;
use crate::traits::Metric;
use crate::types::{MetricKind, MetricValue};

use super::atomic_f64_add;

/// A monotonically increasing value.
///
/// Stored as `f64` bits in an `AtomicU64`; increments use a compare-exchange
/// loop so concurrent writers never lose updates.
#[derive(Debug, Default)]
pub struct Counter {
    bits: AtomicU64,
}

impl Counter {
    /// Create a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment by one.
    pub fn inc(&self) {
        self.inc_by(1.0);
    }

    /// Increment by `delta`. Counters only go up: negative or non-finite
    /// deltas are ignored.
    pub fn inc_by(&self, delta: f64) {
        if !delta.is_finite() || delta < 0.0 {
            return;
        }
        atomic_f64_add(&self.bits, delta);
    }

    /// Current value.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

impl Metric for Counter {
    type Args = ();
    const KIND: MetricKind = MetricKind::Counter;

    fn build(_args: ()) -> Result<Self> {
        Ok(Self::new())
    }

    fn value(&self) -> MetricValue {
        MetricValue::Counter(self.get())
    }
}
