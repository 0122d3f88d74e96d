//! Scatter image elements across a viewport so that together they cover a
//! target fraction of its area, and lay them out again after resizes settle.
//!
//! The crate never talks to a browser directly: element discovery, image
//! loading and style writes go through the [`Document`] trait, and randomness
//! through [`RandomSource`], so layouts are reproducible under test.

pub mod audit;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod random;
pub mod runtime;
pub mod style;

pub use audit::{
    LayoutAudit, LayoutAuditEvent, LayoutAuditEventBuilder, LayoutAuditStage, NullLayoutAudit,
    RecordingLayoutAudit,
};
pub use config::{LayoutConfig, MoodboardOptions};
pub use document::{Document, ElementHandle, ElementId, MemoryDocument};
pub use engine::{Debouncer, EngineOptions, LayoutEngine, LayoutEvent, PassSummary};
pub use error::{ConfigError, MoodboardError, Result};
pub use geometry::{IntrinsicSize, PlacementBox, Viewport};
pub use layout::{Placement, PlacedElement, Resolution, compute_box};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink, NullSink, StderrSink,
};
pub use metrics::{LayoutMetrics, MetricSnapshot};
pub use random::{RandomSource, SeededRandom, SequenceRandom, ThreadRandom, random_number};
pub use runtime::{ChannelDriver, HostMessage};
pub use style::PositionStyle;
