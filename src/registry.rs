//! Deduplicating metric instance registry.
//!
//! [`MetricRegistry`] maps a metric name plus label set to a single,
//! stably-identified metric instance. Application code asks for "the metric
//! called X with these labels" as often as it likes; the backend sees each
//! family and each labeled instance exactly once.
//!
//! # Identity
//!
//! Two caches back the lookup, both keyed by `u64` content hashes:
//!
//! - **Families** are keyed on the hash of the *canonical* metric name, so
//!   spellings that resolve to the same well-known constant share one
//!   backend registration.
//! - **Instances** are keyed on the hash of the raw name plus each raw
//!   label pair in label-name order. Label sets are ordered by key, so
//!   set-equal inputs hash identically regardless of insertion order.
//!
//! Raw spellings that alias through normalization therefore produce
//! distinct instance-cache keys, but they resolve to the same backend
//! instance because the family dedupes on the normalized label set.
//!
//! # Concurrency
//!
//! Cache hits take only a read lock. Creation is double-checked under the
//! write lock: re-probe after acquiring it, then call the backend, then
//! publish. All work is in-memory hashing and map lookups; nothing here
//! blocks on I/O. A cache entry is inserted if and only if the backend call
//! fully succeeded, so a failed creation leaves both caches untouched.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::backend::{Counter, Gauge, Histogram};
use crate::error::Result;
use crate::labels::LabelSet;
use crate::names;
use crate::telemetry;
use crate::traits::{DefaultFactory, FamilyFactory, FamilyHandle, FamilyRegistry, Metric};

/// Registry of counters over a default-configured factory.
pub type CounterRegistry = MetricRegistry<Counter, DefaultFactory>;
/// Registry of gauges over a default-configured factory.
pub type GaugeRegistry = MetricRegistry<Gauge, DefaultFactory>;
/// Registry of histograms over a default-configured factory.
pub type HistogramRegistry = MetricRegistry<Histogram, DefaultFactory>;

/// Idempotent get-or-create for metric instances.
///
/// Generic over the instance type `M` and the family-factory capability `F`
/// supplied at construction. The backend registry is held as a shared
/// handle whose lifetime exceeds the registry's own; this registry never
/// tears it down.
///
/// ```rust
/// use std::sync::Arc;
/// use muninn::{CollectorRegistry, CounterRegistry, DefaultFactory, LabelSet, MetricRegistry};
///
/// # fn main() -> muninn::Result<()> {
/// let backend = Arc::new(CollectorRegistry::new());
/// let counters = CounterRegistry::new(backend, DefaultFactory);
///
/// let labels = LabelSet::new().with("http_method", "GET");
/// let requests = counters.get("requests_total", &labels, ())?;
/// requests.inc();
///
/// let again = counters.get("requests_total", &labels, ())?;
/// assert!(Arc::ptr_eq(&requests, &again));
/// # Ok(())
/// # }
/// ```
pub struct MetricRegistry<M: Metric, F: FamilyFactory<M>> {
    backend: Arc<dyn FamilyRegistry<M>>,
    factory: F,
    families: RwLock<HashMap<u64, Arc<dyn FamilyHandle<M>>>>,
    instances: RwLock<HashMap<u64, Arc<M>>>,
}

impl<M: Metric, F: FamilyFactory<M>> MetricRegistry<M, F> {
    /// Create a registry over the given backend and family factory.
    pub fn new(backend: Arc<dyn FamilyRegistry<M>>, factory: F) -> Self {
        Self {
            backend,
            factory,
            families: RwLock::new(HashMap::new()),
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// Get or create the metric instance for `name` and `labels`.
    ///
    /// `args` are backend-specific construction arguments (histogram bucket
    /// boundaries, say) and are used only when the instance is first
    /// created; on a cache hit they are dropped unused.
    ///
    /// Repeated calls with the same name and a set-equal label set return
    /// the same instance, and backend registration happens exactly once per
    /// distinct pair. Backend failures propagate unchanged and cache
    /// nothing.
    pub fn get(&self, name: &str, labels: &LabelSet, args: M::Args) -> Result<Arc<M>> {
        let family = self.family(name)?;

        let key = instance_key(name, labels);
        if let Some(metric) = self.instances.read().unwrap().get(&key) {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL, "cache" => "instance").increment(1);
            return Ok(Arc::clone(metric));
        }
        metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "cache" => "instance").increment(1);

        let normalized = labels.normalized();
        let mut instances = self.instances.write().unwrap();
        // Double-check after acquiring the write lock.
        if let Some(metric) = instances.get(&key) {
            return Ok(Arc::clone(metric));
        }
        let metric = family.add(&normalized, args)?;
        instances.insert(key, Arc::clone(&metric));
        debug!(metric = name, family = family.name(), "created labeled instance");
        Ok(metric)
    }

    /// Number of distinct families ever created. Monotonically
    /// non-decreasing, independent of lookup repetition.
    pub fn family_count(&self) -> usize {
        self.families.read().unwrap().len()
    }

    /// Number of distinct instance keys ever created. Monotonically
    /// non-decreasing, independent of lookup repetition.
    pub fn instance_count(&self) -> usize {
        self.instances.read().unwrap().len()
    }

    fn family(&self, raw: &str) -> Result<Arc<dyn FamilyHandle<M>>> {
        let canonical = names::canonical_metric_name(raw);
        let key = family_key(&canonical);
        if let Some(family) = self.families.read().unwrap().get(&key) {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL, "cache" => "family").increment(1);
            return Ok(Arc::clone(family));
        }
        metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "cache" => "family").increment(1);

        let mut families = self.families.write().unwrap();
        if let Some(family) = families.get(&key) {
            return Ok(Arc::clone(family));
        }
        let builder = self.factory.builder().name(canonical.as_ref());
        let family = self.backend.register(builder)?;
        families.insert(key, Arc::clone(&family));
        debug!(family = family.name(), raw, "registered metric family");
        Ok(family)
    }
}

/// Cache key for a family: hash of the canonical name alone.
///
/// Uses `DefaultHasher` (SipHash); deterministic within a process lifetime,
/// which is all an in-memory cache needs.
fn family_key(canonical_name: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    canonical_name.hash(&mut hasher);
    hasher.finish()
}

/// Cache key for an instance: hash of the raw name plus each raw label
/// (name, then value) pair, iterated in label-name order.
fn instance_key(name: &str, labels: &LabelSet) -> u64 {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    for (label, value) in labels.iter() {
        label.hash(&mut hasher);
        value.hash(&mut hasher);
    }
    hasher.finish()
}
