//! Layout lifecycle audit hooks.
//!
//! Records capture a stage plus structured details so hosts can buffer or
//! visualize how layout progressed without instrumenting the engine itself.

use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use serde_json::Value;

/// Checkpoints emitted by `LayoutEngine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutAuditStage {
    /// Engine constructed and elements discovered.
    EngineConstructed,
    /// A layout pass started.
    PassStarted,
    /// An element received a new box.
    ElementPlaced,
    /// Placement waits for the element's intrinsic size.
    PlacementDeferred,
    /// An element's intrinsic size became known.
    ImageResolved,
    /// A resize restarted the debounce timer.
    ResizeScheduled,
    /// The debounce timer elapsed and a pass was triggered.
    ResizeFired,
}

/// Structured audit entry.
#[derive(Debug, Clone)]
pub struct LayoutAuditEvent {
    pub timestamp: SystemTime,
    pub stage: LayoutAuditStage,
    pub details: Vec<(String, Value)>,
}

impl LayoutAuditEvent {
    fn new(stage: LayoutAuditStage) -> Self {
        Self {
            timestamp: SystemTime::now(),
            stage,
            details: Vec::new(),
        }
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }
}

/// Builder helper to append fields ergonomically.
pub struct LayoutAuditEventBuilder {
    event: LayoutAuditEvent,
}

impl LayoutAuditEventBuilder {
    pub fn new(stage: LayoutAuditStage) -> Self {
        Self {
            event: LayoutAuditEvent::new(stage),
        }
    }

    pub fn detail(mut self, key: impl Into<String>, value: Value) -> Self {
        self.event.details.push((key.into(), value));
        self
    }

    pub fn finish(self) -> LayoutAuditEvent {
        self.event
    }
}

/// Trait implemented by any audit sink.
pub trait LayoutAudit: Send + Sync {
    fn record(&self, event: LayoutAuditEvent);
}

/// Default no-op implementation used when auditing is disabled.
#[derive(Debug, Default)]
pub struct NullLayoutAudit;

impl LayoutAudit for NullLayoutAudit {
    fn record(&self, _event: LayoutAuditEvent) {}
}

/// Keeps every record in memory. Clones share the buffer.
#[derive(Debug, Default, Clone)]
pub struct RecordingLayoutAudit {
    events: Arc<Mutex<Vec<LayoutAuditEvent>>>,
}

impl RecordingLayoutAudit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LayoutAuditEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn stages(&self) -> Vec<LayoutAuditStage> {
        self.events().iter().map(|event| event.stage).collect()
    }

    pub fn count(&self, stage: LayoutAuditStage) -> usize {
        self.events()
            .iter()
            .filter(|event| event.stage == stage)
            .count()
    }
}

impl LayoutAudit for RecordingLayoutAudit {
    fn record(&self, event: LayoutAuditEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}
