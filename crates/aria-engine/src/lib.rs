//! # aria-engine
//!
//! Playback engine for the Aria music player.
//!
//! The engine owns the single hardware audio resource and reconciles
//! asynchronous resource events (ready, position, ended, error) with user
//! commands (play, pause, seek, volume, shuffle, repeat). Commands are
//! non-blocking; resource events arrive on one inbound channel and are
//! consumed strictly in emission order.

pub mod engine;
pub mod media;
pub mod navigation;
pub mod volume;

#[cfg(test)]
pub(crate) mod test_support;

pub use engine::{EngineEvent, PlaybackEngine};
pub use media::{
    BindingId, MediaBackend, MediaResource, ResourceEvent, ResourceEventKind,
};
pub use navigation::PrevAction;
pub use volume::VolumeController;
