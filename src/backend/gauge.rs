//! Settable gauge instance.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;
use crate::traits::Metric;
use crate::types::{MetricKind, MetricValue};

use super::atomic_f64_add;

/// A value that can go up and down.
#[derive(Debug, Default)]
pub struct Gauge {
    bits: AtomicU64,
}

impl Gauge {
    /// Create a gauge at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set to an absolute value.
    pub fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Increment by one.
    pub fn inc(&self) {
        self.add(1.0);
    }

    /// Decrement by one.
    pub fn dec(&self) {
        self.add(-1.0);
    }

    /// Add `delta` (may be negative).
    pub fn add(&self, delta: f64) {
        atomic_f64_add(&self.bits, delta);
    }

    /// Subtract `delta`.
    pub fn sub(&self, delta: f64) {
        self.add(-delta);
    }

    /// Current value.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

impl Metric for Gauge {
    type Args = ();
    const KIND: MetricKind = MetricKind::Gauge;

    fn build(_args: ()) -> Result<Self> {
        Ok(Self::new())
    }

    fn value(&self) -> MetricValue {
        MetricValue::Gauge(self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_in_both_directions() {
        let gauge = Gauge::new();
        gauge.inc();
        gauge.inc();
        gauge.dec();
        assert_eq!(gauge.get(), 1.0);
        gauge.add(4.5);
        gauge.sub(0.5);
        assert_eq!(gauge.get(), 5.0);
    }

    #[test]
    fn set_overwrites() {
        let gauge = Gauge::new();
        gauge.add(10.0);
        gauge.set(-3.0);
        assert_eq!(gauge.get(), -3.0);
    }
}
