//! Tests for the registry's self-telemetry.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and assert
//! on emitted metrics without needing a real exporter.

use std::sync::Arc;

use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

use muninn::{CollectorRegistry, CounterRegistry, DefaultFactory, LabelSet, telemetry};

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

/// Sum counter values matching a metric name and a `cache` label value.
fn counter_total(snapshot: &SnapshotVec, name: &str, cache: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| {
            key.kind() == MetricKind::Counter
                && key.key().name() == name
                && key
                    .key()
                    .labels()
                    .any(|label| label.key() == "cache" && label.value() == cache)
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

#[test]
fn lookups_record_cache_hits_and_misses() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let backend = Arc::new(CollectorRegistry::new());
        let registry = CounterRegistry::new(backend, DefaultFactory);
        let labels = LabelSet::new().with("http_method", "GET");

        // First call misses both caches, second hits both.
        registry.get("requests_total", &labels, ()).unwrap();
        registry.get("requests_total", &labels, ()).unwrap();
    });

    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter_total(&snapshot, telemetry::CACHE_MISSES_TOTAL, "family"),
        1,
    );
    assert_eq!(
        counter_total(&snapshot, telemetry::CACHE_MISSES_TOTAL, "instance"),
        1,
    );
    assert_eq!(
        counter_total(&snapshot, telemetry::CACHE_HITS_TOTAL, "family"),
        1,
    );
    assert_eq!(
        counter_total(&snapshot, telemetry::CACHE_HITS_TOTAL, "instance"),
        1,
    );
}

#[test]
fn new_label_set_hits_the_family_cache_only() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let backend = Arc::new(CollectorRegistry::new());
        let registry = CounterRegistry::new(backend, DefaultFactory);

        registry
            .get("requests_total", &LabelSet::new().with("http_method", "GET"), ())
            .unwrap();
        registry
            .get("requests_total", &LabelSet::new().with("http_method", "POST"), ())
            .unwrap();
    });

    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter_total(&snapshot, telemetry::CACHE_HITS_TOTAL, "family"),
        1,
    );
    assert_eq!(
        counter_total(&snapshot, telemetry::CACHE_MISSES_TOTAL, "instance"),
        2,
    );
    assert_eq!(
        counter_total(&snapshot, telemetry::CACHE_HITS_TOTAL, "instance"),
        0,
    );
}

#[test]
fn telemetry_is_noop_without_recorder() {
    // Verify no panics when no recorder is installed.
    let backend = Arc::new(CollectorRegistry::new());
    let registry = CounterRegistry::new(backend, DefaultFactory);
    let labels = LabelSet::new().with("http_method", "GET");
    registry.get("requests_total", &labels, ()).unwrap();
    registry.get("requests_total", &labels, ()).unwrap();
}
