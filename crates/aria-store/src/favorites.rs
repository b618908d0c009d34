//! Persisted favorites and catalog snapshots.

use aria_core::{Catalog, Song};
use tracing::{debug, warn};

use crate::kv::KvStore;

/// Key holding the favorites as a JSON array of songs.
pub const FAVORITES_KEY: &str = "favoriteSongs";

/// Key holding the catalog snapshot as a JSON array of songs.
pub const CATALOG_KEY: &str = "songs";

fn parse_songs(key: &str, raw: &str) -> Vec<Song> {
    match serde_json::from_str(raw) {
        Ok(songs) => songs,
        Err(e) => {
            warn!("malformed {key} payload, starting empty: {e}");
            Vec::new()
        }
    }
}

/// The persisted set of favorite songs.
///
/// Loaded once at construction; every mutation is written back
/// synchronously. Storage failures leave the in-memory set intact.
pub struct FavoritesStore<S: KvStore> {
    kv: S,
    favorites: Vec<Song>,
}

impl<S: KvStore> FavoritesStore<S> {
    /// Load the favorites from storage. Absent or malformed data resolves
    /// to an empty set.
    pub fn load(kv: S) -> Self {
        let favorites = kv
            .get(FAVORITES_KEY)
            .map(|raw| parse_songs(FAVORITES_KEY, &raw))
            .unwrap_or_default();
        debug!("loaded {} favorite songs", favorites.len());
        Self { kv, favorites }
    }

    /// The favorite songs, in the order they were added.
    pub fn favorites(&self) -> &[Song] {
        &self.favorites
    }

    pub fn is_favorite(&self, song_id: &str) -> bool {
        self.favorites.iter().any(|s| s.id == song_id)
    }

    /// Add or remove a song from the favorites. Returns whether the song
    /// is a favorite afterwards.
    pub fn toggle(&mut self, song: &Song) -> bool {
        let now_favorite = if self.is_favorite(&song.id) {
            self.favorites.retain(|s| s.id != song.id);
            false
        } else {
            self.favorites.push(song.clone());
            true
        };
        self.persist();
        now_favorite
    }

    fn persist(&self) {
        let payload = match serde_json::to_string(&self.favorites) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("failed to serialize favorites: {e}");
                return;
            }
        };
        if let Err(e) = self.kv.set(FAVORITES_KEY, &payload) {
            warn!("failed to persist favorites: {e}");
        }
    }
}

/// Write the catalog snapshot used for shuffle and navigation.
pub fn save_catalog_snapshot<S: KvStore>(kv: &S, catalog: &Catalog) {
    let payload = match serde_json::to_string(catalog.songs()) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("failed to serialize catalog snapshot: {e}");
            return;
        }
    };
    if let Err(e) = kv.set(CATALOG_KEY, &payload) {
        warn!("failed to persist catalog snapshot: {e}");
    }
}

/// Read back the catalog snapshot. Absent or malformed data resolves to an
/// empty catalog.
pub fn load_catalog_snapshot<S: KvStore>(kv: &S) -> Catalog {
    let songs = kv
        .get(CATALOG_KEY)
        .map(|raw| parse_songs(CATALOG_KEY, &raw))
        .unwrap_or_default();
    Catalog::new(songs)
}
