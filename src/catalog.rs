//! The catalog store: the authoritative, persisted list of songs. Every
//! mutation is gated on the acting role and written through to storage before
//! the in-memory list changes, so what the UI shows is always what is saved.

use std::collections::BTreeSet;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};

use crate::auth::RoleSource;
use crate::db::{Storage, SONGS_KEY};
use crate::models::{default_songs, NewSong, Song};

pub struct CatalogStore {
    storage: Rc<Storage>,
    songs: Vec<Song>,
    genres: Vec<String>,
}

impl CatalogStore {
    /// Load the saved catalog, falling back to the default songs when nothing
    /// was saved yet or the saved value cannot be parsed. The fallback is
    /// written back so the stored value is valid afterwards.
    pub fn load(storage: Rc<Storage>) -> Result<Self> {
        let saved = storage.get_item(SONGS_KEY)?;

        let songs = match saved.as_deref().map(serde_json::from_str::<Vec<Song>>) {
            Some(Ok(songs)) => {
                tracing::debug!(count = songs.len(), "loaded saved catalog");
                songs
            }
            Some(Err(err)) => {
                tracing::warn!(error = %err, "saved catalog is malformed, restoring defaults");
                let songs = default_songs();
                persist(&storage, &songs)?;
                songs
            }
            None => {
                tracing::debug!("no saved catalog, seeding defaults");
                let songs = default_songs();
                persist(&storage, &songs)?;
                songs
            }
        };

        let genres = derive_genres(&songs);
        Ok(Self {
            storage,
            songs,
            genres,
        })
    }

    /// Append a song with the next free id. Returns `None` without touching
    /// anything when the acting role may not edit the catalog, and an error
    /// when the largest id is already `i64::MAX`.
    pub fn add(&mut self, role: &dyn RoleSource, song: NewSong) -> Result<Option<Song>> {
        if !role.is_admin() {
            tracing::debug!("ignoring add from non-admin");
            return Ok(None);
        }

        let id = next_id(&self.songs)
            .ok_or_else(|| anyhow!("no song id left after {}", i64::MAX))?;
        let song = song.with_id(id);
        let mut songs = self.songs.clone();
        songs.push(song.clone());
        self.replace(songs)?;

        tracing::info!(id = song.id, title = %song.title, "added song");
        Ok(Some(song))
    }

    /// Drop the song with `id`. Returns whether a song was removed; an unknown
    /// id or a non-admin role leaves the catalog as it was.
    pub fn remove(&mut self, role: &dyn RoleSource, id: i64) -> Result<bool> {
        if !role.is_admin() {
            tracing::debug!(id, "ignoring remove from non-admin");
            return Ok(false);
        }

        let songs: Vec<Song> = self.songs.iter().filter(|s| s.id != id).cloned().collect();
        let removed = songs.len() != self.songs.len();
        self.replace(songs)?;

        if removed {
            tracing::info!(id, "removed song");
        }
        Ok(removed)
    }

    /// Put the original eight songs back, discarding every add and delete.
    pub fn restore_defaults(&mut self, role: &dyn RoleSource) -> Result<bool> {
        if !role.is_admin() {
            tracing::debug!("ignoring restore from non-admin");
            return Ok(false);
        }

        self.replace(default_songs())?;
        tracing::info!("restored default catalog");
        Ok(true)
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Distinct genres in the catalog, alphabetically sorted.
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn get(&self, id: i64) -> Option<&Song> {
        self.songs.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    fn replace(&mut self, songs: Vec<Song>) -> Result<()> {
        persist(&self.storage, &songs)?;
        self.genres = derive_genres(&songs);
        self.songs = songs;
        Ok(())
    }
}

fn persist(storage: &Storage, songs: &[Song]) -> Result<()> {
    let json = serde_json::to_string(songs).context("failed to serialize catalog")?;
    storage.set_item(SONGS_KEY, &json)
}

fn next_id(songs: &[Song]) -> Option<i64> {
    songs.iter().map(|s| s.id).max().unwrap_or(0).max(0).checked_add(1)
}

fn derive_genres(songs: &[Song]) -> Vec<String> {
    songs
        .iter()
        .map(|s| s.genre.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    const ADMIN: Option<Role> = Some(Role::Admin);
    const USER: Option<Role> = Some(Role::User);

    fn new_song(title: &str) -> NewSong {
        NewSong {
            title: title.to_string(),
            artist: "Shreya Ghoshal".to_string(),
            album: "Singles".to_string(),
            genre: "Classical".to_string(),
            year: 2019,
            duration: "3:30".to_string(),
        }
    }

    fn store_with_ids(ids: &[i64]) -> CatalogStore {
        let songs: Vec<Song> = default_songs()
            .into_iter()
            .zip(ids)
            .map(|(song, &id)| Song { id, ..song })
            .collect();
        let storage = Rc::new(Storage::in_memory().unwrap());
        storage
            .set_item(SONGS_KEY, &serde_json::to_string(&songs).unwrap())
            .unwrap();
        CatalogStore::load(storage).unwrap()
    }

    #[test]
    fn fresh_store_seeds_and_persists_defaults() {
        let storage = Rc::new(Storage::in_memory().unwrap());
        let store = CatalogStore::load(Rc::clone(&storage)).unwrap();
        assert_eq!(store.songs(), default_songs().as_slice());
        assert!(storage.get_item(SONGS_KEY).unwrap().is_some());
    }

    #[test]
    fn add_assigns_max_id_plus_one() {
        let mut store = store_with_ids(&[1, 3, 4]);
        let added = store.add(&ADMIN, new_song("Ghoomar")).unwrap().unwrap();
        assert_eq!(added.id, 5);
        assert_eq!(store.songs().last().unwrap().title, "Ghoomar");
    }

    #[test]
    fn add_past_the_largest_id_is_an_error() {
        let mut store = store_with_ids(&[1, i64::MAX]);
        let saved = store.storage.get_item(SONGS_KEY).unwrap();

        assert!(store.add(&ADMIN, new_song("Ghoomar")).is_err());
        assert_eq!(store.len(), 2);
        assert_eq!(store.storage.get_item(SONGS_KEY).unwrap(), saved);
    }

    #[test]
    fn add_to_empty_store_starts_at_one() {
        let mut store = store_with_ids(&[]);
        assert!(store.is_empty());
        let added = store.add(&ADMIN, new_song("Ghoomar")).unwrap().unwrap();
        assert_eq!(added.id, 1);
    }

    #[test]
    fn genres_are_distinct_sorted_and_track_mutations() {
        let mut store = store_with_ids(&[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(
            store.genres(),
            ["Dance", "Fusion", "Party", "Romantic", "Soulful"]
        );

        store.add(&ADMIN, new_song("Ghoomar")).unwrap();
        assert_eq!(store.genres()[0], "Classical");

        store.remove(&ADMIN, 4).unwrap();
        assert!(!store.genres().iter().any(|g| g == "Dance"));
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let mut store = store_with_ids(&[1, 2, 3]);
        assert!(!store.remove(&ADMIN, 42).unwrap());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn non_admin_mutations_are_ignored() {
        let mut store = store_with_ids(&[1, 2, 3]);
        let before: Vec<i64> = store.songs().iter().map(|s| s.id).collect();

        assert_eq!(store.add(&USER, new_song("Ghoomar")).unwrap(), None);
        assert!(!store.remove(&USER, 1).unwrap());
        assert!(!store.remove(&None::<Role>, 2).unwrap());
        assert!(!store.restore_defaults(&USER).unwrap());

        let after: Vec<i64> = store.songs().iter().map(|s| s.id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn malformed_saved_catalog_falls_back_to_defaults() {
        let storage = Rc::new(Storage::in_memory().unwrap());
        storage.set_item(SONGS_KEY, "{not json").unwrap();

        let store = CatalogStore::load(Rc::clone(&storage)).unwrap();
        assert_eq!(store.len(), 8);

        let saved = storage.get_item(SONGS_KEY).unwrap().unwrap();
        let reparsed: Vec<Song> = serde_json::from_str(&saved).unwrap();
        assert_eq!(reparsed, default_songs());
    }

    #[test]
    fn get_finds_by_id() {
        let store = store_with_ids(&[1, 2, 3]);
        assert_eq!(store.get(2).unwrap().title, "Kal Ho Naa Ho");
        assert!(store.get(9).is_none());
    }
}
