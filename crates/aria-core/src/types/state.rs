//! Published playback state.

use serde::{Deserialize, Serialize};

use super::{RepeatMode, Song};

/// The engine's current playback phase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportStatus {
    /// No song loaded.
    #[default]
    Idle,
    /// A resource is bound but not yet ready.
    Loading,
    Playing,
    Paused,
    /// The last song finished and nothing followed it.
    Ended,
    /// The resource failed; cleared by the next play command.
    Error,
}

impl TransportStatus {
    /// Whether a resource is currently bound in this phase.
    pub const fn has_resource(self) -> bool {
        matches!(self, Self::Loading | Self::Playing | Self::Paused)
    }
}

/// Immutable snapshot of playback state published to the UI.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlaybackSnapshot {
    /// The song currently loaded, if any. `None` exactly when the
    /// transport is idle.
    pub current_song: Option<Song>,
    /// Current transport phase.
    pub transport: TransportStatus,
    /// Playback progress as a fraction of song duration, in [0, 1].
    pub progress: f64,
    /// Output volume in [0, 1].
    pub volume: f32,
    /// Repeat mode.
    pub repeat_mode: RepeatMode,
    /// Whether shuffle is enabled.
    pub shuffled: bool,
}
