//! Layout orchestration.
//!
//! [`LayoutEngine`] discovers elements through a [`Document`], splits the
//! configured coverage equally between them and re-runs layout after resize
//! bursts settle. It is driven by [`LayoutEvent`]s from a single-threaded host
//! loop; time only moves when a `Tick` arrives.

mod debounce;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Value, json};

use crate::audit::{LayoutAudit, LayoutAuditEventBuilder, LayoutAuditStage, NullLayoutAudit};
use crate::config::{LayoutConfig, MoodboardOptions};
use crate::document::{Document, ElementId};
use crate::error::{MoodboardError, Result};
use crate::geometry::{IntrinsicSize, Viewport};
use crate::layout::{Placement, PlacedElement, Resolution};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv, json_str};
use crate::metrics::{LayoutMetrics, MetricSnapshot};
use crate::random::RandomSource;

pub use debounce::Debouncer;

const ENGINE_TARGET: &str = "moodboard::engine";
const ELEMENT_TARGET: &str = "moodboard::element";

/// Ambient knobs for the engine: logging, metrics and auditing.
#[derive(Clone)]
pub struct EngineOptions {
    /// Structured logger. Defaults to JSON lines on stderr at `info`.
    pub logger: Option<Logger>,
    /// Counter accumulator, shareable with the host.
    pub metrics: Option<Arc<Mutex<LayoutMetrics>>>,
    /// Lifecycle audit sink.
    pub audit: Arc<dyn LayoutAudit>,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            logger: Some(Logger::stderr()),
            metrics: Some(Arc::new(Mutex::new(LayoutMetrics::new()))),
            audit: Arc::new(NullLayoutAudit),
            metrics_target: "moodboard::metrics".to_string(),
        }
    }
}

impl EngineOptions {
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn without_logger(mut self) -> Self {
        self.logger = None;
        self
    }

    pub fn with_audit<A>(mut self, audit: A) -> Self
    where
        A: LayoutAudit + 'static,
    {
        self.audit = Arc::new(audit);
        self
    }

    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(LayoutMetrics::new())));
        }
    }

    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<LayoutMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Events a host feeds into the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEvent {
    /// An element's image finished loading.
    ImageLoaded {
        element: ElementId,
        size: IntrinsicSize,
    },
    /// An element's image could not be loaded.
    ImageFailed { element: ElementId, reason: String },
    /// The viewport changed size.
    Resize(Viewport),
    /// Host time advanced.
    Tick { elapsed: Duration },
}

/// Outcome counts for one layout pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    pub placed: usize,
    pub unchanged: usize,
    pub deferred: usize,
    pub failed: usize,
}

impl PassSummary {
    fn record(&mut self, outcome: Option<Placement>) {
        match outcome {
            Some(Placement::Placed(_)) => self.placed += 1,
            Some(Placement::Unchanged(_)) => self.unchanged += 1,
            Some(Placement::Deferred) => self.deferred += 1,
            None => self.failed += 1,
        }
    }
}

pub struct LayoutEngine<D, R> {
    selector: String,
    config: LayoutConfig,
    document: D,
    random: R,
    elements: Vec<PlacedElement>,
    index: HashMap<ElementId, usize>,
    viewport: Viewport,
    debouncer: Debouncer,
    clock: Duration,
    options: EngineOptions,
}

impl<D, R> LayoutEngine<D, R>
where
    D: Document,
    R: RandomSource,
{
    pub fn new(selector: &str, config: LayoutConfig, document: D, random: R) -> Result<Self> {
        Self::with_options(selector, config, document, random, EngineOptions::default())
    }

    /// Build from a host option bag, filling defaults for missing keys.
    pub fn from_options(
        selector: &str,
        options: &MoodboardOptions,
        document: D,
        random: R,
    ) -> Result<Self> {
        Self::new(selector, options.resolve()?, document, random)
    }

    /// Discover elements matching `selector`, start their image loads and run
    /// the initial layout pass.
    ///
    /// Only an invalid `config` is an error. A selector that matches nothing
    /// is logged and yields an engine whose passes do nothing.
    pub fn with_options(
        selector: &str,
        config: LayoutConfig,
        mut document: D,
        random: R,
        options: EngineOptions,
    ) -> Result<Self> {
        config.validate()?;

        let elements: Vec<PlacedElement> = document
            .query_selector_all(selector)
            .into_iter()
            .map(|handle| PlacedElement::attach(handle, &mut document))
            .collect();
        let index = elements
            .iter()
            .enumerate()
            .map(|(idx, element)| (element.id(), idx))
            .collect();
        let viewport = document.viewport();

        let mut engine = Self {
            selector: selector.to_string(),
            config,
            document,
            random,
            elements,
            index,
            viewport,
            debouncer: Debouncer::new(config.resize_delay),
            clock: Duration::ZERO,
            options,
        };

        if engine.elements.is_empty() {
            engine.log(
                LogLevel::Error,
                ENGINE_TARGET,
                "no elements given to the layout engine",
                [json_str("selector", selector)],
            );
        }

        engine.log(
            LogLevel::Info,
            ENGINE_TARGET,
            "engine_constructed",
            [
                json_str("selector", selector),
                json_kv("elements", engine.elements.len()),
                json_kv("coverage", config.coverage),
                json_kv("variation", config.variation),
                json_kv("resize_delay_ms", config.resize_delay.as_millis() as u64),
                json_kv("resize_enabled", config.resize_enabled),
            ],
        );
        engine.audit(
            LayoutAuditEventBuilder::new(LayoutAuditStage::EngineConstructed)
                .detail("elements", json!(engine.elements.len())),
        );

        engine.layout_pass();
        Ok(engine)
    }

    /// Position every element against the current viewport.
    pub fn layout_pass(&mut self) -> PassSummary {
        self.viewport = self.document.viewport();
        let share = self.config.coverage_share(self.elements.len());

        self.with_metrics(LayoutMetrics::record_pass);
        self.audit(
            LayoutAuditEventBuilder::new(LayoutAuditStage::PassStarted)
                .detail("width", json!(self.viewport.width))
                .detail("height", json!(self.viewport.height))
                .detail("coverage_share", json!(share)),
        );

        let mut summary = PassSummary::default();
        for idx in 0..self.elements.len() {
            let outcome = self.place(idx, share);
            summary.record(outcome);
        }

        self.log(
            LogLevel::Debug,
            ENGINE_TARGET,
            "layout_pass",
            [
                json_kv("width", self.viewport.width),
                json_kv("height", self.viewport.height),
                json_kv("coverage_share", share),
                json_kv("placed", summary.placed),
                json_kv("unchanged", summary.unchanged),
                json_kv("deferred", summary.deferred),
                json_kv("failed", summary.failed),
            ],
        );
        summary
    }

    /// Apply one host event.
    ///
    /// Image events for elements this engine does not manage are rejected
    /// with [`MoodboardError::UnknownElement`].
    pub fn handle_event(&mut self, event: LayoutEvent) -> Result<()> {
        match event {
            LayoutEvent::ImageLoaded { element, size } => self.image_loaded(element, size),
            LayoutEvent::ImageFailed { element, reason } => {
                self.lookup(element)?;
                self.log(
                    LogLevel::Warn,
                    ELEMENT_TARGET,
                    "image_failed",
                    [json_kv("element", element.0), json_str("reason", reason)],
                );
                Ok(())
            }
            LayoutEvent::Resize(viewport) => {
                self.resized(viewport);
                Ok(())
            }
            LayoutEvent::Tick { elapsed } => {
                self.advance(elapsed);
                Ok(())
            }
        }
    }

    /// Apply one host event, logging a rejected one instead of returning it.
    ///
    /// Returns false when the event was rejected.
    pub fn dispatch(&mut self, event: LayoutEvent) -> bool {
        match self.handle_event(event) {
            Ok(()) => true,
            Err(err) => {
                self.log(
                    LogLevel::Warn,
                    ENGINE_TARGET,
                    "event_rejected",
                    [json_str("error", err.to_string())],
                );
                false
            }
        }
    }

    /// Feed a fixed sequence of events. Rejected events are logged and
    /// skipped; the count of them is returned.
    pub fn run_scripted<I>(&mut self, events: I) -> usize
    where
        I: IntoIterator<Item = LayoutEvent>,
    {
        let mut rejected = 0;
        for event in events {
            if !self.dispatch(event) {
                rejected += 1;
            }
        }
        rejected
    }

    /// Move the clock forward and fire the resize pass if it is due.
    pub fn advance(&mut self, elapsed: Duration) {
        self.clock = self.clock.saturating_add(elapsed);
        if self.debouncer.fire(self.clock) {
            self.with_metrics(LayoutMetrics::record_resize_pass);
            self.log(
                LogLevel::Info,
                ENGINE_TARGET,
                "resize_fired",
                [json_kv("clock_ms", self.clock.as_millis() as u64)],
            );
            self.audit(LayoutAuditEventBuilder::new(LayoutAuditStage::ResizeFired));
            self.layout_pass();
        }
    }

    /// Time until a pending resize pass is due.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.debouncer.remaining(self.clock)
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Viewport read by the most recent layout pass.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn elements(&self) -> &[PlacedElement] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&PlacedElement> {
        self.index.get(&id).map(|&idx| &self.elements[idx])
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn metrics_snapshot(&self) -> Option<MetricSnapshot> {
        let metrics = self.options.metrics.as_ref()?;
        let guard = metrics.lock().ok()?;
        Some(guard.snapshot(self.clock))
    }

    /// Log the current metrics snapshot, if metrics are enabled.
    pub fn emit_metrics(&self) {
        if let (Some(logger), Some(snapshot)) =
            (self.options.logger.as_ref(), self.metrics_snapshot())
        {
            let _ = logger.log_event(snapshot.to_log_event(&self.options.metrics_target));
        }
    }

    fn lookup(&self, element: ElementId) -> Result<usize> {
        self.index
            .get(&element)
            .copied()
            .ok_or(MoodboardError::UnknownElement(element))
    }

    fn image_loaded(&mut self, element: ElementId, size: IntrinsicSize) -> Result<()> {
        let idx = self.lookup(element)?;
        match self.elements[idx].resolve(size) {
            Resolution::Resolved { deferred } => {
                self.log(
                    LogLevel::Debug,
                    ELEMENT_TARGET,
                    "image_loaded",
                    [
                        json_kv("element", element.0),
                        json_kv("width", size.width),
                        json_kv("height", size.height),
                    ],
                );
                self.audit(
                    LayoutAuditEventBuilder::new(LayoutAuditStage::ImageResolved)
                        .detail("element", json!(element.0)),
                );
                if let Some(share) = deferred {
                    self.viewport = self.document.viewport();
                    self.place(idx, share);
                }
            }
            Resolution::AlreadyResolved => {
                self.log(
                    LogLevel::Trace,
                    ELEMENT_TARGET,
                    "image_already_loaded",
                    [json_kv("element", element.0)],
                );
            }
            Resolution::Unusable => {
                self.log(
                    LogLevel::Warn,
                    ELEMENT_TARGET,
                    "image_unusable",
                    [
                        json_kv("element", element.0),
                        json_kv("width", size.width),
                        json_kv("height", size.height),
                    ],
                );
            }
        }
        Ok(())
    }

    fn resized(&mut self, viewport: Viewport) {
        self.document.observe_viewport(viewport);
        if !self.config.resize_enabled {
            return;
        }

        self.with_metrics(LayoutMetrics::record_resize_event);
        let restarted = self.debouncer.schedule(self.clock);
        self.log(
            LogLevel::Debug,
            ENGINE_TARGET,
            "resize_scheduled",
            [
                json_kv("width", viewport.width),
                json_kv("height", viewport.height),
                json_kv("restarted", restarted),
            ],
        );
        self.audit(
            LayoutAuditEventBuilder::new(LayoutAuditStage::ResizeScheduled)
                .detail("restarted", json!(restarted)),
        );
    }

    /// Position one element. `None` means the document rejected the write.
    fn place(&mut self, idx: usize, share: f64) -> Option<Placement> {
        let result = self.elements[idx].position(
            share,
            self.viewport,
            self.config.variation,
            &mut self.random,
            &mut self.document,
        );
        let id = self.elements[idx].id();

        match result {
            Ok(Placement::Placed(placed)) => {
                self.with_metrics(LayoutMetrics::record_placement);
                self.log(
                    LogLevel::Trace,
                    ELEMENT_TARGET,
                    "element_placed",
                    [
                        json_kv("element", id.0),
                        json_kv("width", placed.width),
                        json_kv("height", placed.height),
                        json_kv("left", placed.left),
                        json_kv("top", placed.top),
                    ],
                );
                self.audit(
                    LayoutAuditEventBuilder::new(LayoutAuditStage::ElementPlaced)
                        .detail("element", json!(id.0))
                        .detail("box", json!(placed)),
                );
                Some(Placement::Placed(placed))
            }
            Ok(Placement::Unchanged(placed)) => {
                self.with_metrics(LayoutMetrics::record_skipped_write);
                Some(Placement::Unchanged(placed))
            }
            Ok(Placement::Deferred) => {
                self.with_metrics(LayoutMetrics::record_deferred);
                self.log(
                    LogLevel::Debug,
                    ELEMENT_TARGET,
                    "placement_deferred",
                    [json_kv("element", id.0)],
                );
                self.audit(
                    LayoutAuditEventBuilder::new(LayoutAuditStage::PlacementDeferred)
                        .detail("element", json!(id.0)),
                );
                Some(Placement::Deferred)
            }
            Err(err) => {
                self.log(
                    LogLevel::Warn,
                    ELEMENT_TARGET,
                    "style_failed",
                    [json_kv("element", id.0), json_str("error", err.to_string())],
                );
                None
            }
        }
    }

    fn log<I>(&self, level: LogLevel, target: &str, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(logger) = self.options.logger.as_ref() {
            if !logger.enabled(level) {
                return;
            }
            let event = event_with_fields(level, target, message, fields);
            let _ = logger.log_event(event);
        }
    }

    fn audit(&self, builder: LayoutAuditEventBuilder) {
        self.options.audit.record(builder.finish());
    }

    fn with_metrics(&self, record: impl FnOnce(&mut LayoutMetrics)) {
        if let Some(metrics) = self.options.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                record(&mut *guard);
            }
        }
    }
}
