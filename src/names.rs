//! Well-known metric and label name tables.
//!
//! Metric names and label names arrive as free-form strings, but a fixed
//! vocabulary of them is shared with the downstream aggregation service.
//! Those well-known names are registered under a compact canonical form: the
//! decimal rendering of a stable numeric identifier the consumer decodes back
//! into the full name. Everything outside the vocabulary is used verbatim.
//!
//! The tables are plain `match` arms, so they are compile-time static data
//! with no initialization order to worry about. Identifiers are part of the
//! wire contract: never renumber an existing entry, only append.

use std::borrow::Cow;

/// Well-known metric names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    RequestsTotal,
    ResponsesTotal,
    ErrorsTotal,
    RequestDurationSeconds,
    ActiveSessions,
    BytesReceivedTotal,
    BytesSentTotal,
    UptimeSeconds,
}

impl MetricName {
    /// Resolve a raw string to a well-known metric name.
    ///
    /// Returns `None` for anything outside the vocabulary; callers then use
    /// the raw string unchanged.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "requests_total" => Some(MetricName::RequestsTotal),
            // Legacy spelling kept for dashboards that predate the rename.
            "request_count" => Some(MetricName::RequestsTotal),
            "responses_total" => Some(MetricName::ResponsesTotal),
            "errors_total" => Some(MetricName::ErrorsTotal),
            "request_duration_seconds" => Some(MetricName::RequestDurationSeconds),
            "active_sessions" => Some(MetricName::ActiveSessions),
            "bytes_received_total" => Some(MetricName::BytesReceivedTotal),
            "bytes_sent_total" => Some(MetricName::BytesSentTotal),
            "uptime_seconds" => Some(MetricName::UptimeSeconds),
            _ => None,
        }
    }

    /// Primary spelling of the name.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricName::RequestsTotal => "requests_total",
            MetricName::ResponsesTotal => "responses_total",
            MetricName::ErrorsTotal => "errors_total",
            MetricName::RequestDurationSeconds => "request_duration_seconds",
            MetricName::ActiveSessions => "active_sessions",
            MetricName::BytesReceivedTotal => "bytes_received_total",
            MetricName::BytesSentTotal => "bytes_sent_total",
            MetricName::UptimeSeconds => "uptime_seconds",
        }
    }

    /// Stable wire identifier.
    pub fn id(self) -> u32 {
        match self {
            MetricName::RequestsTotal => 1,
            MetricName::ResponsesTotal => 2,
            MetricName::ErrorsTotal => 3,
            MetricName::RequestDurationSeconds => 4,
            MetricName::ActiveSessions => 5,
            MetricName::BytesReceivedTotal => 6,
            MetricName::BytesSentTotal => 7,
            MetricName::UptimeSeconds => 8,
        }
    }

    /// Canonical externally-registered form: the decimal identifier.
    pub fn canonical(self) -> String {
        self.id().to_string()
    }
}

/// Well-known label names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelName {
    HttpMethod,
    StatusCode,
    Service,
    Host,
    Result,
    Direction,
}

impl LabelName {
    /// Resolve a raw string to a well-known label name.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "http_method" => Some(LabelName::HttpMethod),
            // Legacy spelling kept for callers that predate the rename.
            "method" => Some(LabelName::HttpMethod),
            "status_code" => Some(LabelName::StatusCode),
            "service" => Some(LabelName::Service),
            "host" => Some(LabelName::Host),
            "result" => Some(LabelName::Result),
            "direction" => Some(LabelName::Direction),
            _ => None,
        }
    }

    /// Primary spelling of the name.
    pub fn as_str(self) -> &'static str {
        match self {
            LabelName::HttpMethod => "http_method",
            LabelName::StatusCode => "status_code",
            LabelName::Service => "service",
            LabelName::Host => "host",
            LabelName::Result => "result",
            LabelName::Direction => "direction",
        }
    }

    /// Stable wire identifier.
    pub fn id(self) -> u32 {
        match self {
            LabelName::HttpMethod => 1,
            LabelName::StatusCode => 2,
            LabelName::Service => 3,
            LabelName::Host => 4,
            LabelName::Result => 5,
            LabelName::Direction => 6,
        }
    }

    /// Canonical externally-registered form: the decimal identifier.
    pub fn canonical(self) -> String {
        self.id().to_string()
    }
}

/// Canonical form of a raw metric name: the wire identifier for a recognized
/// name, the raw string unchanged otherwise.
pub fn canonical_metric_name(raw: &str) -> Cow<'_, str> {
    match MetricName::parse(raw) {
        Some(name) => Cow::Owned(name.canonical()),
        None => Cow::Borrowed(raw),
    }
}

/// Canonical form of a raw label name: the wire identifier for a recognized
/// name, the raw string unchanged otherwise.
pub fn canonical_label_name(raw: &str) -> Cow<'_, str> {
    match LabelName::parse(raw) {
        Some(name) => Cow::Owned(name.canonical()),
        None => Cow::Borrowed(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_spellings_parse_back() {
        for name in [
            MetricName::RequestsTotal,
            MetricName::ResponsesTotal,
            MetricName::ErrorsTotal,
            MetricName::RequestDurationSeconds,
            MetricName::ActiveSessions,
            MetricName::BytesReceivedTotal,
            MetricName::BytesSentTotal,
            MetricName::UptimeSeconds,
        ] {
            assert_eq!(MetricName::parse(name.as_str()), Some(name));
        }
    }

    #[test]
    fn legacy_spelling_resolves_to_same_constant() {
        assert_eq!(
            MetricName::parse("request_count"),
            Some(MetricName::RequestsTotal),
        );
        assert_eq!(LabelName::parse("method"), Some(LabelName::HttpMethod));
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(MetricName::parse("queue_depth"), None);
        assert_eq!(canonical_metric_name("queue_depth"), "queue_depth");
        assert_eq!(canonical_label_name("tenant"), "tenant");
    }

    #[test]
    fn canonical_form_is_the_wire_identifier() {
        assert_eq!(canonical_metric_name("requests_total"), "1");
        assert_eq!(canonical_metric_name("request_count"), "1");
        assert_eq!(canonical_label_name("http_method"), "1");
        assert_eq!(canonical_label_name("status_code"), "2");
    }
}
