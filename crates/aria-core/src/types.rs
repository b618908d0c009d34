//! Core domain types for Aria.

pub mod queue;
pub mod song;
pub mod state;

pub use queue::{Queue, QueueItem, RepeatMode};
pub use song::{Catalog, Song};
pub use state::{PlaybackSnapshot, TransportStatus};
