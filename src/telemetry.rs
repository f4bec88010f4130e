//! Telemetry metric name constants.
//!
//! Muninn instruments its own lookup caches through the `metrics` facade.
//! Consumers install their own recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `muninn_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `cache` — which internal cache answered: "family" or "instance"

/// Total lookups answered from an internal cache.
///
/// Labels: `cache` ("family" | "instance").
pub const CACHE_HITS_TOTAL: &str = "muninn_cache_hits_total";

/// Total lookups that fell through to family registration or instance
/// construction.
///
/// Labels: `cache` ("family" | "instance").
pub const CACHE_MISSES_TOTAL: &str = "muninn_cache_misses_total";
