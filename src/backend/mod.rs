//! In-memory metrics backend.
//!
//! Implements the collaborator capabilities from [`traits`](crate::traits):
//! [`CollectorRegistry`] owns every registered family for the process, each
//! [`Family`] owns its labeled instances, and [`Counter`], [`Gauge`] and
//! [`Histogram`] are the instances themselves. Exposition encoding and
//! transport live elsewhere; this backend only stores and snapshots values.

mod counter;
mod gauge;
mod histogram;

pub use counter::Counter;
pub use gauge::Gauge;
pub use histogram::{Buckets, Histogram, DEFAULT_BUCKETS};

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::{MuninnError, Result};
use crate::labels::LabelSet;
use crate::traits::{FamilyBuilder, FamilyHandle, FamilyRegistry, Metric};
use crate::types::{FamilySnapshot, Sample};

/// Add `delta` to an `f64` stored as bits in an `AtomicU64`.
///
/// Compare-exchange loop so concurrent additions never lose updates.
pub(crate) fn atomic_f64_add(bits: &AtomicU64, delta: f64) {
    let mut current = bits.load(Ordering::Relaxed);
    loop {
        let next = (f64::from_bits(current) + delta).to_bits();
        match bits.compare_exchange_weak(current, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return,
            Err(actual) => current = actual,
        }
    }
}

/// Snapshot source for type-erased families.
trait Collect: Send + Sync {
    fn collect(&self) -> FamilySnapshot;
}

#[derive(Default)]
struct Inner {
    families: Vec<Arc<dyn Collect>>,
    names: HashSet<String>,
}

/// Process-wide owner of registered metric families.
///
/// Families of every kind register here; [`gather`](CollectorRegistry::gather)
/// snapshots them all in registration order. Registering a name twice is
/// rejected, which is what surfaces the family-identity mistakes a caller
/// can still make (two deduplicating registries sharing one backend, say).
pub struct CollectorRegistry {
    inner: RwLock<Inner>,
}

impl CollectorRegistry {
    /// Create an empty backend registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Snapshot every registered family, in registration order.
    pub fn gather(&self) -> Vec<FamilySnapshot> {
        let inner = self.inner.read().unwrap();
        inner.families.iter().map(|f| f.collect()).collect()
    }

    /// Number of registered families.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().families.len()
    }

    /// Whether no family has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CollectorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Metric> FamilyRegistry<M> for CollectorRegistry {
    fn register(&self, builder: FamilyBuilder<M>) -> Result<Arc<dyn FamilyHandle<M>>> {
        let mut inner = self.inner.write().unwrap();
        if !inner.names.insert(builder.name.clone()) {
            return Err(MuninnError::DuplicateFamily(builder.name));
        }
        let family = Arc::new(Family::<M>::new(builder.name, builder.help));
        inner.families.push(Arc::clone(&family) as Arc<dyn Collect>);
        Ok(family)
    }
}

/// A named family and the labeled instances it owns.
///
/// Instances are keyed on their (normalized) label set; adding a set the
/// family already holds returns the existing instance.
pub struct Family<M: Metric> {
    name: String,
    help: String,
    instances: RwLock<HashMap<LabelSet, Arc<M>>>,
}

impl<M: Metric> std::fmt::Debug for Family<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Family")
            .field("name", &self.name)
            .field("help", &self.help)
            .finish()
    }
}

impl<M: Metric> Family<M> {
    fn new(name: String, help: String) -> Self {
        Self {
            name,
            help,
            instances: RwLock::new(HashMap::new()),
        }
    }
}

impl<M: Metric> FamilyHandle<M> for Family<M> {
    fn name(&self) -> &str {
        &self.name
    }

    fn add(&self, labels: &LabelSet, args: M::Args) -> Result<Arc<M>> {
        if let Some(existing) = self.instances.read().unwrap().get(labels) {
            return Ok(Arc::clone(existing));
        }

        // Construct outside the write lock; on a lost race the fresh
        // instance is discarded before anyone could observe it.
        let metric = Arc::new(M::build(args)?);

        let mut instances = self.instances.write().unwrap();
        if let Some(existing) = instances.get(labels) {
            return Ok(Arc::clone(existing));
        }
        instances.insert(labels.clone(), Arc::clone(&metric));
        Ok(metric)
    }
}

impl<M: Metric> Collect for Family<M> {
    fn collect(&self) -> FamilySnapshot {
        let instances = self.instances.read().unwrap();
        let mut samples: Vec<Sample> = instances
            .iter()
            .map(|(labels, metric)| Sample {
                labels: labels.clone(),
                value: metric.value(),
            })
            .collect();
        samples.sort_by(|a, b| a.labels.cmp(&b.labels));
        FamilySnapshot {
            name: self.name.clone(),
            help: self.help.clone(),
            kind: M::KIND,
            samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MetricKind, MetricValue};

    fn register_counter_family(
        registry: &CollectorRegistry,
        name: &str,
    ) -> Arc<dyn FamilyHandle<Counter>> {
        registry
            .register(FamilyBuilder::<Counter>::new().name(name).help("test"))
            .unwrap()
    }

    #[test]
    fn duplicate_family_name_is_rejected() {
        let registry = CollectorRegistry::new();
        register_counter_family(&registry, "requests");
        let err = FamilyRegistry::<Counter>::register(
            &registry,
            FamilyBuilder::new().name("requests"),
        )
        .unwrap_err();
        assert!(matches!(err, MuninnError::DuplicateFamily(name) if name == "requests"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn add_dedupes_on_label_set() {
        let registry = CollectorRegistry::new();
        let family = register_counter_family(&registry, "requests");
        let labels = LabelSet::new().with("host", "api-1");

        let a = family.add(&labels, ()).unwrap();
        let b = family.add(&labels, ()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        let other = family.add(&LabelSet::new().with("host", "api-2"), ()).unwrap();
        assert!(!Arc::ptr_eq(&a, &other));
    }

    #[test]
    fn gather_snapshots_all_families_in_registration_order() {
        let registry = CollectorRegistry::new();
        let requests = register_counter_family(&registry, "requests");
        let errors = register_counter_family(&registry, "errors");

        requests
            .add(&LabelSet::new().with("host", "api-1"), ())
            .unwrap()
            .inc();
        errors.add(&LabelSet::new(), ()).unwrap();

        let snapshots = registry.gather();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].name, "requests");
        assert_eq!(snapshots[0].kind, MetricKind::Counter);
        assert_eq!(snapshots[0].samples.len(), 1);
        assert_eq!(snapshots[0].samples[0].value, MetricValue::Counter(1.0));
        assert_eq!(snapshots[1].name, "errors");
    }

    #[test]
    fn samples_are_ordered_by_label_set() {
        let registry = CollectorRegistry::new();
        let family = register_counter_family(&registry, "requests");
        for host in ["api-3", "api-1", "api-2"] {
            family
                .add(&LabelSet::new().with("host", host), ())
                .unwrap();
        }

        let snapshot = registry.gather().remove(0);
        let hosts: Vec<&str> = snapshot
            .samples
            .iter()
            .map(|s| s.labels.get("host").unwrap())
            .collect();
        assert_eq!(hosts, vec!["api-1", "api-2", "api-3"]);
    }
}
