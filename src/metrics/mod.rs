use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct LayoutMetrics {
    layout_passes: u64,
    placements: u64,
    deferred_placements: u64,
    skipped_writes: u64,
    resize_events: u64,
    resize_passes: u64,
}

impl LayoutMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_pass(&mut self) {
        self.layout_passes = self.layout_passes.saturating_add(1);
    }

    pub fn record_placement(&mut self) {
        self.placements = self.placements.saturating_add(1);
    }

    pub fn record_deferred(&mut self) {
        self.deferred_placements = self.deferred_placements.saturating_add(1);
    }

    pub fn record_skipped_write(&mut self) {
        self.skipped_writes = self.skipped_writes.saturating_add(1);
    }

    pub fn record_resize_event(&mut self) {
        self.resize_events = self.resize_events.saturating_add(1);
    }

    pub fn record_resize_pass(&mut self) {
        self.resize_passes = self.resize_passes.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            layout_passes: self.layout_passes,
            placements: self.placements,
            deferred_placements: self.deferred_placements,
            skipped_writes: self.skipped_writes,
            resize_events: self.resize_events,
            resize_passes: self.resize_passes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub layout_passes: u64,
    pub placements: u64,
    pub deferred_placements: u64,
    pub skipped_writes: u64,
    pub resize_events: u64,
    pub resize_passes: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "layout_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("layout_passes".to_string(), json!(self.layout_passes));
        map.insert("placements".to_string(), json!(self.placements));
        map.insert(
            "deferred_placements".to_string(),
            json!(self.deferred_placements),
        );
        map.insert("skipped_writes".to_string(), json!(self.skipped_writes));
        map.insert("resize_events".to_string(), json!(self.resize_events));
        map.insert("resize_passes".to_string(), json!(self.resize_passes));
        map
    }
}
