//! The view engine: a pure derivation from a catalog snapshot plus the current
//! [`ViewState`] to the grouped list the library screen renders. The pipeline
//! always runs filter, then sort, then group.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::Song;

/// Heading of the single group produced when grouping is off.
pub const ALL_SONGS: &str = "All Songs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Title,
    Artist,
    Album,
    Genre,
    Year,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Title,
        SortKey::Artist,
        SortKey::Album,
        SortKey::Genre,
        SortKey::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Artist => "artist",
            SortKey::Album => "album",
            SortKey::Genre => "genre",
            SortKey::Year => "year",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn compare(&self, a: &Song, b: &Song) -> Ordering {
        match self {
            SortKey::Year => a.year.cmp(&b.year),
            SortKey::Title => cmp_ignore_case(&a.title, &b.title),
            SortKey::Artist => cmp_ignore_case(&a.artist, &b.artist),
            SortKey::Album => cmp_ignore_case(&a.album, &b.album),
            SortKey::Genre => cmp_ignore_case(&a.genre, &b.genre),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Field a listing can be grouped by. "No grouping" is `None` on
/// [`ViewState::group_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Artist,
    Album,
    Genre,
    Year,
}

impl GroupKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKey::Artist => "artist",
            GroupKey::Album => "album",
            GroupKey::Genre => "genre",
            GroupKey::Year => "year",
        }
    }

    /// Cycle none → artist → album → genre → year → none.
    pub fn next(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(GroupKey::Artist),
            Some(GroupKey::Artist) => Some(GroupKey::Album),
            Some(GroupKey::Album) => Some(GroupKey::Genre),
            Some(GroupKey::Genre) => Some(GroupKey::Year),
            Some(GroupKey::Year) => None,
        }
    }

    fn label(&self, song: &Song) -> String {
        match self {
            GroupKey::Artist => song.artist.clone(),
            GroupKey::Album => song.album.clone(),
            GroupKey::Genre => song.genre.clone(),
            GroupKey::Year => song.year.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown {kind} `{value}`")]
pub struct ViewKeyError {
    kind: &'static str,
    value: String,
}

impl FromStr for SortKey {
    type Err = ViewKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ViewKeyError {
                kind: "sort key",
                value: s.to_string(),
            })
    }
}

impl FromStr for SortOrder {
    type Err = ViewKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(ViewKeyError {
                kind: "sort order",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for GroupKey {
    type Err = ViewKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "artist" => Ok(GroupKey::Artist),
            "album" => Ok(GroupKey::Album),
            "genre" => Ok(GroupKey::Genre),
            "year" => Ok(GroupKey::Year),
            _ => Err(ViewKeyError {
                kind: "group key",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the user controls about the listing. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub search_term: String,
    /// Exact genre to keep; empty means all genres.
    pub filter_genre: String,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    pub group_by: Option<GroupKey>,
}

impl ViewState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Step the genre filter through "all" and then each genre in `genres`.
    /// A filter that no longer matches any known genre restarts at "all".
    pub fn cycle_genre(&mut self, genres: &[String]) {
        let next = if self.filter_genre.is_empty() {
            genres.first()
        } else {
            genres
                .iter()
                .position(|g| *g == self.filter_genre)
                .and_then(|idx| genres.get(idx + 1))
        };
        self.filter_genre = next.cloned().unwrap_or_default();
    }

    /// Run the whole pipeline over `songs`.
    pub fn apply(&self, songs: &[Song]) -> GroupedSongs {
        let filtered = filter_songs(songs, &self.search_term, &self.filter_genre);
        let sorted = sort_songs(filtered, self.sort_by, self.sort_order);
        group_songs(sorted, self.group_by)
    }
}

/// One heading and the songs listed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongGroup {
    pub name: String,
    pub songs: Vec<Song>,
}

/// Output of the view engine: groups in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupedSongs {
    pub groups: Vec<SongGroup>,
}

impl GroupedSongs {
    /// Songs across every group, i.e. the "Showing X" figure.
    pub fn total(&self) -> usize {
        self.groups.iter().map(|g| g.songs.len()).sum()
    }

    /// All songs in display order, group by group.
    pub fn iter_songs(&self) -> impl Iterator<Item = &Song> {
        self.groups.iter().flat_map(|g| g.songs.iter())
    }
}

/// Keep songs matching both the search term (case-insensitive substring of
/// title, artist or album) and the exact genre. Empty criteria match all.
pub fn filter_songs(songs: &[Song], search_term: &str, genre: &str) -> Vec<Song> {
    let needle = search_term.to_lowercase();
    songs
        .iter()
        .filter(|song| {
            let matches_search = needle.is_empty()
                || song.title.to_lowercase().contains(&needle)
                || song.artist.to_lowercase().contains(&needle)
                || song.album.to_lowercase().contains(&needle);
            let matches_genre = genre.is_empty() || song.genre == genre;
            matches_search && matches_genre
        })
        .cloned()
        .collect()
}

/// Stable sort by `key`. Descending flips the comparison rather than the
/// output, so equal songs keep their relative order either way.
pub fn sort_songs(mut songs: Vec<Song>, key: SortKey, order: SortOrder) -> Vec<Song> {
    songs.sort_by(|a, b| match order {
        SortOrder::Asc => key.compare(a, b),
        SortOrder::Desc => key.compare(b, a),
    });
    songs
}

/// Partition already-sorted songs by `key`, keeping first-seen group order.
pub fn group_songs(songs: Vec<Song>, key: Option<GroupKey>) -> GroupedSongs {
    let Some(key) = key else {
        return GroupedSongs {
            groups: vec![SongGroup {
                name: ALL_SONGS.to_string(),
                songs,
            }],
        };
    };

    let mut groups: Vec<SongGroup> = Vec::new();
    for song in songs {
        let name = key.label(&song);
        match groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.songs.push(song),
            None => groups.push(SongGroup {
                name,
                songs: vec![song],
            }),
        }
    }
    GroupedSongs { groups }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_songs;

    fn titles(songs: &[Song]) -> Vec<&str> {
        songs.iter().map(|s| s.title.as_str()).collect()
    }

    fn song(id: i64, title: &str, artist: &str, year: i32) -> Song {
        Song {
            id,
            title: title.to_string(),
            artist: artist.to_string(),
            album: "Album".to_string(),
            genre: "Pop".to_string(),
            year,
            duration: "3:00".to_string(),
        }
    }

    #[test]
    fn romantic_songs_by_year_ascending() {
        let state = ViewState {
            filter_genre: "Romantic".to_string(),
            sort_by: SortKey::Year,
            ..ViewState::default()
        };
        let result = state.apply(&default_songs());
        assert_eq!(result.groups.len(), 1);
        assert_eq!(result.groups[0].name, ALL_SONGS);
        assert_eq!(
            titles(&result.groups[0].songs),
            [
                "Kal Ho Naa Ho",
                "Tujh Mein Rab Dikhta Hai",
                "Tum Hi Ho",
                "Kesariya"
            ]
        );
    }

    #[test]
    fn search_is_case_insensitive_across_title_artist_album() {
        let songs = default_songs();
        let by_artist = filter_songs(&songs, "ARIJIT", "");
        assert_eq!(
            titles(&by_artist),
            ["Tum Hi Ho", "Kabira", "Kesariya"]
        );

        let by_album = filter_songs(&songs, "slumdog", "");
        assert_eq!(titles(&by_album), ["Jai Ho"]);

        for term in ["ho", "singh", "dil", "a"] {
            let needle = term.to_lowercase();
            for s in filter_songs(&songs, term, "") {
                assert!(
                    s.title.to_lowercase().contains(&needle)
                        || s.artist.to_lowercase().contains(&needle)
                        || s.album.to_lowercase().contains(&needle),
                    "{} does not contain {term}",
                    s.title
                );
            }
        }
    }

    #[test]
    fn search_and_genre_combine() {
        let songs = default_songs();
        let result = filter_songs(&songs, "singh", "Romantic");
        assert_eq!(titles(&result), ["Tum Hi Ho", "Kesariya"]);
        assert!(filter_songs(&songs, "", "romantic").is_empty());
    }

    #[test]
    fn adjacent_pairs_respect_sort_order() {
        let songs = default_songs();
        for key in SortKey::ALL {
            let asc = sort_songs(songs.clone(), key, SortOrder::Asc);
            for pair in asc.windows(2) {
                assert_ne!(key.compare(&pair[0], &pair[1]), Ordering::Greater);
            }
            let desc = sort_songs(songs.clone(), key, SortOrder::Desc);
            for pair in desc.windows(2) {
                assert_ne!(key.compare(&pair[0], &pair[1]), Ordering::Less);
            }
        }
    }

    #[test]
    fn ties_keep_insertion_order_in_both_directions() {
        let songs = vec![
            song(1, "b", "x", 2000),
            song(2, "a", "x", 2001),
            song(3, "c", "x", 2000),
        ];
        let asc = sort_songs(songs.clone(), SortKey::Year, SortOrder::Asc);
        assert_eq!(asc.iter().map(|s| s.id).collect::<Vec<_>>(), [1, 3, 2]);

        let desc = sort_songs(songs, SortKey::Year, SortOrder::Desc);
        assert_eq!(desc.iter().map(|s| s.id).collect::<Vec<_>>(), [2, 1, 3]);
    }

    #[test]
    fn text_sort_ignores_case() {
        let songs = vec![song(1, "beta", "x", 1), song(2, "Alpha", "x", 1)];
        let sorted = sort_songs(songs, SortKey::Title, SortOrder::Asc);
        assert_eq!(titles(&sorted), ["Alpha", "beta"]);
    }

    #[test]
    fn grouping_keeps_first_seen_order_and_partitions() {
        let songs = default_songs();
        let sorted = sort_songs(songs.clone(), SortKey::Title, SortOrder::Asc);
        let grouped = group_songs(sorted.clone(), Some(GroupKey::Genre));

        let names: Vec<&str> = grouped.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Dance", "Party", "Fusion", "Soulful", "Romantic"]);

        assert_eq!(grouped.total(), sorted.len());
        let mut seen: Vec<i64> = grouped.iter_songs().map(|s| s.id).collect();
        seen.sort_unstable();
        assert_eq!(seen, [1, 2, 3, 4, 5, 6, 7, 8]);

        for group in &grouped.groups {
            let expected: Vec<&Song> =
                sorted.iter().filter(|s| s.genre == group.name).collect();
            assert_eq!(group.songs.iter().collect::<Vec<_>>(), expected);
        }
    }

    #[test]
    fn year_groups_use_decimal_labels() {
        let state = ViewState {
            sort_by: SortKey::Year,
            sort_order: SortOrder::Desc,
            group_by: Some(GroupKey::Year),
            ..ViewState::default()
        };
        let grouped = state.apply(&default_songs());
        let names: Vec<&str> = grouped.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(
            names,
            ["2022", "2015", "2013", "2008", "2003", "1998"]
        );
        assert_eq!(grouped.groups[2].songs.len(), 2);
    }

    #[test]
    fn empty_result_still_has_all_songs_group() {
        let state = ViewState {
            search_term: "zzz".to_string(),
            ..ViewState::default()
        };
        let grouped = state.apply(&default_songs());
        assert_eq!(grouped.groups.len(), 1);
        assert_eq!(grouped.total(), 0);
    }

    #[test]
    fn genre_cycle_walks_list_then_returns_to_all() {
        let genres = vec!["Dance".to_string(), "Pop".to_string()];
        let mut state = ViewState::default();
        state.cycle_genre(&genres);
        assert_eq!(state.filter_genre, "Dance");
        state.cycle_genre(&genres);
        assert_eq!(state.filter_genre, "Pop");
        state.cycle_genre(&genres);
        assert_eq!(state.filter_genre, "");

        state.filter_genre = "Gone".to_string();
        state.cycle_genre(&genres);
        assert_eq!(state.filter_genre, "");
    }

    #[test]
    fn keys_parse_from_names() {
        assert_eq!("year".parse::<SortKey>().unwrap(), SortKey::Year);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert_eq!("album".parse::<GroupKey>().unwrap(), GroupKey::Album);
        let err = "rating".parse::<SortKey>().unwrap_err();
        assert_eq!(err.to_string(), "unknown sort key `rating`");
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = ViewState {
            search_term: "ho".to_string(),
            filter_genre: "Party".to_string(),
            sort_by: SortKey::Album,
            sort_order: SortOrder::Desc,
            group_by: Some(GroupKey::Artist),
        };
        state.reset();
        assert_eq!(state, ViewState::default());
        assert_eq!(state.sort_by.next(), SortKey::Artist);
        assert_eq!(SortKey::Year.next(), SortKey::Title);
        assert_eq!(GroupKey::next(Some(GroupKey::Year)), None);
    }
}
