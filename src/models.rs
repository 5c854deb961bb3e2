//! Domain models shared by the storage layer, the catalog, the view engine and
//! the TUI. These types stay light-weight data holders so the other layers can
//! focus on persistence, derivation and presentation.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One catalog entry. The JSON field names match the persisted catalog format,
/// so the struct serializes straight into the `musicLibrarySongs` value.
pub struct Song {
    /// Assigned by the catalog store; unique within the store.
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    /// Release year. Kept numeric so sorting by year is numeric instead of
    /// lexicographic.
    pub year: i32,
    /// Free-form `M:SS` text, displayed as-is.
    pub duration: String,
}

impl Song {
    /// `Title - Artist`, used by confirmation dialogs and status messages.
    pub fn display_title(&self) -> String {
        if self.artist.trim().is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, self.artist)
        }
    }
}

/// A song that has not been assigned an id yet. The catalog store turns it
/// into a [`Song`] when it is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub year: i32,
    pub duration: String,
}

impl NewSong {
    pub(crate) fn with_id(self, id: i64) -> Song {
        Song {
            id,
            title: self.title,
            artist: self.artist,
            album: self.album,
            genre: self.genre,
            year: self.year,
            duration: self.duration,
        }
    }
}

/// Role carried by a signed-in session. Only admins may mutate the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::User => write!(f, "User"),
        }
    }
}

/// Seed rows: (title, artist, album, genre, year, duration). Ids are the
/// 1-based position in this table.
const DEFAULT_CATALOG: [(&str, &str, &str, &str, i32, &str); 8] = [
    (
        "Tujh Mein Rab Dikhta Hai",
        "Roop Kumar Rathod",
        "Rab Ne Bana Di Jodi",
        "Romantic",
        2008,
        "4:41",
    ),
    (
        "Kal Ho Naa Ho",
        "Sonu Nigam",
        "Kal Ho Naa Ho",
        "Romantic",
        2003,
        "5:21",
    ),
    (
        "Tum Hi Ho",
        "Arijit Singh",
        "Aashiqui 2",
        "Romantic",
        2013,
        "4:22",
    ),
    (
        "Chaiyya Chaiyya",
        "Sukhwinder Singh, Sapna Awasthi",
        "Dil Se..",
        "Dance",
        1998,
        "6:53",
    ),
    (
        "Gallan Goodiyaan",
        "Yashita Sharma, Manish Kumar Tipu, Farhan Akhtar",
        "Dil Dhadakne Do",
        "Party",
        2015,
        "4:58",
    ),
    (
        "Jai Ho",
        "A. R. Rahman, Sukhwinder Singh",
        "Slumdog Millionaire",
        "Fusion",
        2008,
        "5:19",
    ),
    (
        "Kabira",
        "Arijit Singh, Harshdeep Kaur",
        "Yeh Jawaani Hai Deewani",
        "Soulful",
        2013,
        "3:44",
    ),
    (
        "Kesariya",
        "Arijit Singh",
        "Brahmāstra",
        "Romantic",
        2022,
        "4:28",
    ),
];

/// The eight-song catalog every fresh store starts from, and the sequence the
/// "restore all songs" action puts back.
pub fn default_songs() -> Vec<Song> {
    DEFAULT_CATALOG
        .iter()
        .zip(1..)
        .map(|(&(title, artist, album, genre, year, duration), id)| Song {
            id,
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
            genre: genre.to_string(),
            year,
            duration: duration.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_songs_have_sequential_ids() {
        let songs = default_songs();
        let ids: Vec<i64> = songs.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(songs[7].title, "Kesariya");
        assert_eq!(songs[7].album, "Brahmāstra");
    }

    #[test]
    fn song_serializes_with_catalog_field_names() {
        let song = &default_songs()[1];
        let json = serde_json::to_value(song).unwrap();
        assert_eq!(json["id"], 2);
        assert_eq!(json["title"], "Kal Ho Naa Ho");
        assert_eq!(json["year"], 2003);
        assert_eq!(json["duration"], "5:21");
    }

    #[test]
    fn role_round_trips_as_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
    }
}
