//! Document capability seam.
//!
//! The engine never touches a browser directly. Hosts implement [`Document`]
//! over their DOM binding; [`MemoryDocument`] backs headless runs and tests.

mod core;
mod memory;

pub use self::core::{Document, ElementHandle, ElementId};
pub use memory::{MemoryDocument, MemoryElement};
