//! Host loops that feed events into a [`LayoutEngine`](crate::LayoutEngine).
//!
//! Scripted runs go through `LayoutEngine::run_scripted`; the drivers here
//! own an engine and translate wall-clock time into ticks.

pub mod driver;

pub use driver::channel::{ChannelDriver, HostMessage};
