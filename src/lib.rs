//! Muninn - deduplicating metric instance registry
//!
//! This crate sits between application code, which repeatedly asks for "the
//! metric called X with these labels", and a metrics backend, which must not
//! accumulate duplicate time series for the same logical metric. The
//! [`MetricRegistry`] hands back the unique live instance for each
//! (name, label set) pair, creating the family and instance on first
//! observation and reusing them on every lookup after that.
//!
//! Construction is pluggable: the registry is generic over the metric kind
//! (counter, gauge, histogram) and delegates to capability traits for family
//! building and registration, so it works against the in-crate in-memory
//! backend or any other implementation of the same interfaces.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use muninn::{CollectorRegistry, CounterRegistry, DefaultFactory, LabelSet};
//!
//! fn main() -> muninn::Result<()> {
//!     let backend = Arc::new(CollectorRegistry::new());
//!     let counters = CounterRegistry::new(backend.clone(), DefaultFactory);
//!
//!     let labels = LabelSet::new().with("http_method", "GET");
//!     counters.get("requests_total", &labels, ())?.inc();
//!
//!     // Same name and labels: the same instance comes back, and the
//!     // backend still holds a single time series.
//!     counters.get("requests_total", &labels, ())?.inc();
//!     assert_eq!(counters.instance_count(), 1);
//!
//!     let snapshot = backend.gather();
//!     assert_eq!(snapshot.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod error;
pub mod labels;
pub mod names;
pub mod registry;
pub mod telemetry;
pub mod traits;
pub mod types;

// Re-export main types at crate root
pub use backend::{Buckets, CollectorRegistry, Counter, Gauge, Histogram, DEFAULT_BUCKETS};
pub use error::{MuninnError, Result};
pub use labels::LabelSet;
pub use names::{LabelName, MetricName};
pub use registry::{CounterRegistry, GaugeRegistry, HistogramRegistry, MetricRegistry};
pub use traits::{
    DefaultFactory, FamilyBuilder, FamilyFactory, FamilyHandle, FamilyRegistry, FnFactory, Metric,
};
pub use types::{FamilySnapshot, MetricKind, MetricValue, Sample};
