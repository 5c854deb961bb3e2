use crate::models::Song;
use crate::view::{GroupedSongs, ViewState};

/// The library listing: the user's view controls plus the derived groups the
/// view engine produced for them. `selected` indexes songs in display order,
/// across group boundaries.
pub(crate) struct LibraryScreen {
    pub(crate) view: ViewState,
    pub(crate) grouped: GroupedSongs,
    pub(crate) catalog_len: usize,
    pub(crate) selected: usize,
    pub(crate) show_info: bool,
}

impl LibraryScreen {
    pub(crate) fn new(songs: &[Song]) -> Self {
        let mut screen = Self {
            view: ViewState::default(),
            grouped: GroupedSongs::default(),
            catalog_len: 0,
            selected: 0,
            show_info: false,
        };
        screen.refresh(songs);
        screen
    }

    /// Re-run the view engine. Called after every view change or catalog
    /// mutation so the listing never goes stale.
    pub(crate) fn refresh(&mut self, songs: &[Song]) {
        self.grouped = self.view.apply(songs);
        self.catalog_len = songs.len();
        self.ensure_in_bounds();
    }

    pub(crate) fn shown(&self) -> usize {
        self.grouped.total()
    }

    pub(crate) fn current_song(&self) -> Option<&Song> {
        self.grouped.iter_songs().nth(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        let len = self.shown();
        if len == 0 {
            return;
        }
        let new = (self.selected as isize + offset).clamp(0, len as isize - 1);
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.shown().saturating_sub(1);
    }

    /// "Showing X of Y songs".
    pub(crate) fn summary(&self) -> String {
        format!("Showing {} of {} songs", self.shown(), self.catalog_len)
    }

    fn ensure_in_bounds(&mut self) {
        let len = self.shown();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}
