//! Next/previous song decisions.
//!
//! Pure policy over queue, catalog, repeat mode, and playback position.
//! The engine executes whatever these functions decide.

use aria_core::{Catalog, Queue, RepeatMode, Song};

/// Position threshold for the previous command, in seconds. Strictly above
/// it, previous restarts the current song instead of navigating.
pub const PREVIOUS_RESTART_THRESHOLD_SECS: f64 = 3.0;

/// What the previous command should do.
#[derive(Debug, Clone, PartialEq)]
pub enum PrevAction {
    /// Seek the current song back to position 0.
    Restart,
    /// Navigate to this song.
    Play(Song),
}

/// Decide the song that follows the current one.
///
/// A non-empty queue strictly takes priority over catalog order: its head is
/// consumed. Otherwise the catalog advances sequentially, wrapping to the
/// first song under [`RepeatMode::All`].
pub fn next_song(
    queue: &mut Queue,
    catalog: &Catalog,
    current: Option<&Song>,
    repeat: RepeatMode,
) -> Option<Song> {
    if let Some(item) = queue.pop_front() {
        return Some(item.song);
    }

    let index = catalog.index_of(&current?.id)?;
    if index + 1 < catalog.len() {
        catalog.get(index + 1).cloned()
    } else if repeat == RepeatMode::All {
        catalog.first().cloned()
    } else {
        None
    }
}

/// Decide what the previous command should do given the hardware position.
pub fn previous_action(
    position_secs: f64,
    catalog: &Catalog,
    current: Option<&Song>,
    repeat: RepeatMode,
) -> Option<PrevAction> {
    if position_secs > PREVIOUS_RESTART_THRESHOLD_SECS {
        return Some(PrevAction::Restart);
    }

    let index = catalog.index_of(&current?.id)?;
    if index > 0 {
        catalog.get(index - 1).cloned().map(PrevAction::Play)
    } else if repeat == RepeatMode::All {
        catalog.last().cloned().map(PrevAction::Play)
    } else {
        None
    }
}
