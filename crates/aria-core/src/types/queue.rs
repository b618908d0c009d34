//! Playback queue types.
//!
//! The queue is the user-overridden "play next" list. It is strictly FIFO
//! and always takes priority over catalog order when navigating.

#![allow(clippy::unwrap_used)] // Tests use unwrap for brevity

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Catalog, Song};

/// A single item in the playback queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueueItem {
    /// Unique identifier for this queue entry.
    pub id: Uuid,
    /// The song to play.
    pub song: Song,
}

impl QueueItem {
    pub fn new(song: Song) -> Self {
        Self {
            id: Uuid::new_v4(),
            song,
        }
    }
}

/// The FIFO playback queue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Queue {
    items: VecDeque<QueueItem>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// All items in play order.
    pub fn items(&self) -> impl Iterator<Item = &QueueItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a song to the end of the queue.
    pub fn push(&mut self, song: Song) {
        self.items.push_back(QueueItem::new(song));
    }

    /// Dequeue the head of the queue.
    pub fn pop_front(&mut self) -> Option<QueueItem> {
        self.items.pop_front()
    }

    /// Remove every entry holding the given song. Returns how many were
    /// removed.
    pub fn remove_song(&mut self, song_id: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.song.id != song_id);
        before - self.items.len()
    }

    /// Whether any entry holds the given song.
    pub fn contains_song(&self, song_id: &str) -> bool {
        self.items.iter().any(|item| item.song.id == song_id)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replace the queue wholesale with a uniformly random permutation of
    /// the catalog, excluding the song identified by `exclude` (the one
    /// currently playing).
    pub fn refill_shuffled<R: Rng>(
        &mut self,
        catalog: &Catalog,
        exclude: Option<&str>,
        rng: &mut R,
    ) {
        let mut songs: Vec<Song> = catalog
            .iter()
            .filter(|song| exclude != Some(song.id.as_str()))
            .cloned()
            .collect();
        songs.shuffle(rng);

        self.items = songs.into_iter().map(QueueItem::new).collect();
    }
}

/// Repeat mode for playback.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// No repeat.
    #[default]
    Off,
    /// Repeat the entire catalog.
    All,
    /// Repeat the current song.
    One,
}

impl RepeatMode {
    /// The next mode in the Off -> All -> One -> Off cycle.
    pub const fn cycled(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }

    /// Whether the hardware loop flag should be set for this mode.
    pub const fn loops_resource(self) -> bool {
        matches!(self, Self::One)
    }
}
