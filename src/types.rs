//! Shared metric data types: kinds and value snapshots.

use serde::Serialize;

use crate::labels::LabelSet;

/// Which kind of time series a metric instance produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram,
}

impl MetricKind {
    /// Lowercase name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
        }
    }
}

/// Point-in-time value of a single metric instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricValue {
    Counter(f64),
    Gauge(f64),
    Histogram {
        /// Bucket upper bounds, ascending. Parallel to `cumulative_counts`.
        upper_bounds: Vec<f64>,
        /// Observations less than or equal to the matching upper bound.
        cumulative_counts: Vec<u64>,
        /// Sum of all observed values.
        sum: f64,
        /// Total observation count, including values above the last bound.
        count: u64,
    },
}

/// One labeled instance's value within a family snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub labels: LabelSet,
    pub value: MetricValue,
}

/// Point-in-time view of a registered family and all its instances.
///
/// Produced by [`CollectorRegistry::gather`](crate::CollectorRegistry::gather).
/// Samples are ordered by label set so repeated gathers are comparable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilySnapshot {
    pub name: String,
    pub help: String,
    pub kind: MetricKind,
    pub samples: Vec<Sample>,
}
