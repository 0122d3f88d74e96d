mod types;

pub use types::{ConfigError, MoodboardError, Result};
