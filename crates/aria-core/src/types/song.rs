//! Song and catalog types.

use serde::{Deserialize, Serialize};

/// A single song in the library.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Song {
    /// Stable library-wide identifier.
    pub id: String,
    /// Song title.
    pub title: String,
    /// Artist name.
    pub artist: String,
    /// Album name.
    pub album: String,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Path or URL of the audio media.
    pub media_path: String,
    /// Cover art reference (path or URL).
    pub cover: String,
}

impl Song {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: String::new(),
            album: String::new(),
            duration_secs: 0.0,
            media_path: String::new(),
            cover: String::new(),
        }
    }

    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    #[must_use]
    pub const fn with_duration(mut self, secs: f64) -> Self {
        self.duration_secs = secs;
        self
    }

    #[must_use]
    pub fn with_media_path(mut self, path: impl Into<String>) -> Self {
        self.media_path = path.into();
        self
    }

    /// "Artist - Title" display form.
    pub fn display(&self) -> String {
        if self.artist.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.artist, self.title)
        }
    }
}

/// The ordered song library.
///
/// Insertion order is the canonical sequential playback order. The catalog
/// is supplied once at engine construction and never mutated by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    songs: Vec<Song>,
}

impl Catalog {
    pub const fn new(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    /// All songs in canonical order.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub const fn len(&self) -> usize {
        self.songs.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    pub fn first(&self) -> Option<&Song> {
        self.songs.first()
    }

    pub fn last(&self) -> Option<&Song> {
        self.songs.last()
    }

    /// Position of a song in canonical order.
    pub fn index_of(&self, song_id: &str) -> Option<usize> {
        self.songs.iter().position(|s| s.id == song_id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Song> {
        self.songs.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Song;
    type IntoIter = std::slice::Iter<'a, Song>;

    fn into_iter(self) -> Self::IntoIter {
        self.songs.iter()
    }
}
