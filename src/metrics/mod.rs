use serde_json::json;

use crate::logging::{LogEvent, LogFields, LogLevel};

/// Counters accumulated by an alignment writer.
#[derive(Debug, Default, Clone)]
pub struct WriterMetrics {
    width_queries: u64,
    width_fallbacks: u64,
    lines_emitted: u64,
}

impl WriterMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_width_query(&mut self, fell_back: bool) {
        self.width_queries = self.width_queries.saturating_add(1);
        if fell_back {
            self.width_fallbacks = self.width_fallbacks.saturating_add(1);
        }
    }

    pub fn record_lines(&mut self, count: usize) {
        if count > 0 {
            self.lines_emitted = self.lines_emitted.saturating_add(count as u64);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            width_queries: self.width_queries,
            width_fallbacks: self.width_fallbacks,
            lines_emitted: self.lines_emitted,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub width_queries: u64,
    pub width_fallbacks: u64,
    pub lines_emitted: u64,
}

impl MetricsSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "writer_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("width_queries".to_string(), json!(self.width_queries));
        map.insert("width_fallbacks".to_string(), json!(self.width_fallbacks));
        map.insert("lines_emitted".to_string(), json!(self.lines_emitted));
        map
    }
}
