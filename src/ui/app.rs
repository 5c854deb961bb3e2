use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::auth::{AuthError, AuthGate, RoleSource, DEMO_CREDENTIALS};
use crate::catalog::CatalogStore;
use crate::models::{Role, Song};

use super::forms::{ConfirmSongDelete, LoginField, LoginForm, SongField, SongForm};
use super::helpers::{centered_rect, fit_column, key_style, surface_error};
use super::screens::LibraryScreen;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Column widths for the song table: title, artist, album, genre, year.
const COLUMNS: [usize; 5] = [28, 30, 24, 10, 6];

/// Which top-level screen is showing. The library is only reachable with a
/// session.
enum Screen {
    Login(LoginForm),
    Library(LibraryScreen),
}

/// Modal state layered on top of the library screen.
enum Mode {
    Normal,
    Searching(SearchState),
    AddingSong(SongForm),
    ConfirmSongDelete(ConfirmSongDelete),
    ConfirmRestore,
}

/// Live search edits the view's search term directly; this keeps the term
/// from before the search started so Esc can put it back.
struct SearchState {
    previous: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    auth: AuthGate,
    catalog: CatalogStore,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Start on the library when `auth` already holds a restored session,
    /// otherwise on the sign-in form.
    pub fn new(auth: AuthGate, catalog: CatalogStore) -> Self {
        let screen = if auth.is_authenticated() {
            Screen::Library(LibraryScreen::new(catalog.songs()))
        } else {
            Screen::Login(LoginForm::default())
        };
        Self {
            auth,
            catalog,
            screen,
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn auth(&self) -> &AuthGate {
        &self.auth
    }

    /// Feed one key press through the state machine. Returns `true` once the
    /// user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;

        if matches!(self.screen, Screen::Login(_)) {
            self.handle_login_key(code, &mut exit)?;
            return Ok(exit);
        }

        let mut mode = mem::replace(&mut self.mode, Mode::Normal);
        mode = match mode {
            Mode::Normal => self.handle_library_key(code, &mut exit)?,
            Mode::Searching(state) => self.handle_search(code, state)?,
            Mode::AddingSong(form) => self.handle_add_song(code, form)?,
            Mode::ConfirmSongDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
            Mode::ConfirmRestore => self.handle_confirm_restore(code)?,
        };

        // Logging out from the library drops back to the sign-in form, which
        // has no modes of its own.
        if matches!(self.screen, Screen::Library(_)) {
            self.mode = mode;
        }
        Ok(exit)
    }

    fn handle_login_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<()> {
        let Screen::Login(form) = &mut self.screen else {
            return Ok(());
        };

        match code {
            KeyCode::Esc => *exit = true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                let username = form.username.clone();
                let password = form.password.clone();
                match self.auth.login(&username, &password) {
                    Ok(role) => self.open_library(role),
                    Err(AuthError::InvalidCredentials) => {
                        let message = AuthError::InvalidCredentials.to_string();
                        form.reject(message.clone());
                        self.set_status(message, StatusKind::Error);
                    }
                    Err(AuthError::Storage(err)) => return Err(err),
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_library_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        let is_admin = self.auth.is_admin();
        let mut logout = false;
        let mut clear_status = false;

        {
            let Screen::Library(library) = &mut self.screen else {
                return Ok(Mode::Normal);
            };
            let songs = self.catalog.songs();

            match code {
                KeyCode::Char('q') => *exit = true,
                KeyCode::Esc => clear_status = true,
                KeyCode::Up => library.move_selection(-1),
                KeyCode::Down => library.move_selection(1),
                KeyCode::PageUp => library.move_selection(-5),
                KeyCode::PageDown => library.move_selection(5),
                KeyCode::Home => library.select_first(),
                KeyCode::End => library.select_last(),
                KeyCode::Char('/') | KeyCode::Char('f') => {
                    return Ok(Mode::Searching(SearchState {
                        previous: library.view.search_term.clone(),
                    }));
                }
                KeyCode::Char('g') => {
                    library.view.cycle_genre(self.catalog.genres());
                    library.refresh(songs);
                }
                KeyCode::Char('s') => {
                    library.view.sort_by = library.view.sort_by.next();
                    library.refresh(songs);
                }
                KeyCode::Char('o') => {
                    library.view.sort_order = library.view.sort_order.toggle();
                    library.refresh(songs);
                }
                KeyCode::Char('b') => {
                    library.view.group_by = crate::view::GroupKey::next(library.view.group_by);
                    library.refresh(songs);
                }
                KeyCode::Char('r') => {
                    library.view.reset();
                    library.refresh(songs);
                    clear_status = true;
                }
                KeyCode::Char('i') => library.show_info = !library.show_info,
                KeyCode::Char('L') => logout = true,
                KeyCode::Char('+') if is_admin => {
                    return Ok(Mode::AddingSong(SongForm::default()));
                }
                KeyCode::Char('-') if is_admin => {
                    if let Some(song) = library.current_song().cloned() {
                        return Ok(Mode::ConfirmSongDelete(ConfirmSongDelete { song }));
                    }
                }
                KeyCode::Char('R') if is_admin => return Ok(Mode::ConfirmRestore),
                _ => {}
            }
        }

        if logout {
            self.auth.logout()?;
            self.screen = Screen::Login(LoginForm::default());
            self.set_status("Signed out.", StatusKind::Info);
        } else if clear_status {
            self.clear_status();
        }
        Ok(Mode::Normal)
    }

    fn handle_search(&mut self, code: KeyCode, state: SearchState) -> Result<Mode> {
        let Screen::Library(library) = &mut self.screen else {
            return Ok(Mode::Normal);
        };

        match code {
            KeyCode::Esc => {
                library.view.search_term = state.previous;
                library.refresh(self.catalog.songs());
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => return Ok(Mode::Normal),
            KeyCode::Up => library.move_selection(-1),
            KeyCode::Down => library.move_selection(1),
            KeyCode::Backspace => {
                library.view.search_term.pop();
                library.refresh(self.catalog.songs());
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                library.view.search_term.push(ch);
                library.refresh(self.catalog.songs());
            }
            _ => {}
        }
        Ok(Mode::Searching(state))
    }

    fn handle_add_song(&mut self, code: KeyCode, mut form: SongForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                if !form.cancel_autocomplete() {
                    self.set_status("Add song cancelled.", StatusKind::Info);
                    keep_open = false;
                }
            }
            KeyCode::Tab => {
                if !form.accept_suggestion() {
                    form.cycle_field(true);
                }
            }
            KeyCode::Right if form.has_active_suggestion() => {
                form.accept_suggestion();
            }
            KeyCode::Down => form.cycle_field(true),
            KeyCode::BackTab | KeyCode::Up => form.cycle_field(false),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_song(&form) {
                Ok(()) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            form.update_suggestion(self.catalog.genres());
            Ok(Mode::AddingSong(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmSongDelete) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.catalog.remove(&self.auth, confirm.song.id) {
                    Ok(removed) => {
                        self.refresh_library(None);
                        if removed {
                            self.set_status(
                                format!("Deleted {}.", confirm.song.display_title()),
                                StatusKind::Info,
                            );
                        }
                        Ok(Mode::Normal)
                    }
                    Err(err) => {
                        self.set_status(surface_error(&err), StatusKind::Error);
                        Ok(Mode::ConfirmSongDelete(confirm))
                    }
                }
            }
            _ => Ok(Mode::ConfirmSongDelete(confirm)),
        }
    }

    fn handle_confirm_restore(&mut self, code: KeyCode) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Restore cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.catalog.restore_defaults(&self.auth) {
                    Ok(restored) => {
                        self.refresh_library(None);
                        if restored {
                            self.set_status("Restored the default songs.", StatusKind::Info);
                        }
                        Ok(Mode::Normal)
                    }
                    Err(err) => {
                        self.set_status(surface_error(&err), StatusKind::Error);
                        Ok(Mode::ConfirmRestore)
                    }
                }
            }
            _ => Ok(Mode::ConfirmRestore),
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Login(form) => self.draw_login(frame, content_area, form),
            Screen::Library(library) => self.draw_library(frame, content_area, library),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::Searching(_) => {
                if let Screen::Library(library) = &self.screen {
                    self.draw_search_bar(frame, area, &library.view.search_term);
                }
            }
            Mode::AddingSong(form) => self.draw_song_form(frame, area, form),
            Mode::ConfirmSongDelete(confirm) => self.draw_confirm(
                frame,
                area,
                "Delete Song",
                vec![
                    Line::from("Delete this song from the library?"),
                    Line::from(Span::styled(
                        confirm.song.display_title(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                ],
            ),
            Mode::ConfirmRestore => self.draw_confirm(
                frame,
                area,
                "Restore All Songs",
                vec![
                    Line::from("Put back the original songs?"),
                    Line::from("Added songs are discarded and deleted ones come back."),
                ],
            ),
            Mode::Normal => {}
        }
    }

    fn draw_login(&self, frame: &mut Frame, area: Rect, form: &LoginForm) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Sign in to Music Library")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line("Username", LoginField::Username),
            form.build_line("Password", LoginField::Password),
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to sign in • Tab to switch • Esc to quit",
                Style::default().fg(Color::Gray),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Demo accounts",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (username, password, role) in DEMO_CREDENTIALS {
            lines.push(Line::from(format!("  {role}: {username} / {password}")));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, inner);

        let (prefix, row) = match form.active {
            LoginField::Username => ("Username: ", 0),
            LoginField::Password => ("Password: ", 1),
        };
        frame.set_cursor_position((
            inner.x + prefix.len() as u16 + form.value_len(form.active) as u16,
            inner.y + row,
        ));
    }

    fn draw_library(&self, frame: &mut Frame, area: Rect, library: &LibraryScreen) {
        let info_height = if library.show_info { 7 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(info_height),
                Constraint::Length(3),
                Constraint::Min(1),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);
        if library.show_info {
            draw_info(frame, chunks[1]);
        }
        draw_controls(frame, chunks[2], library);
        self.draw_song_list(frame, chunks[3], library);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            "♪ Music Library",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )];

        if let Some(session) = self.auth.session() {
            let badge = match session.role {
                Role::Admin => Style::default().fg(Color::Black).bg(Color::Yellow),
                Role::User => Style::default().fg(Color::Black).bg(Color::Gray),
            };
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!(" {} ", session.role), badge));
            spans.push(Span::raw(format!("  Welcome, {}!", session.user)));
        }

        let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, area);
    }

    fn draw_song_list(&self, frame: &mut Frame, area: Rect, library: &LibraryScreen) {
        let title = match library.view.group_by {
            Some(key) => format!("Songs by {key}"),
            None => crate::view::ALL_SONGS.to_string(),
        };
        let block = Block::default().title(title).borders(Borders::ALL);

        if library.shown() == 0 {
            let message = Paragraph::new("No songs found matching your criteria.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let heading_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let mut items = vec![ListItem::new(Line::from(Span::styled(
            song_columns(["Title", "Artist", "Album", "Genre", "Year", "Time"]),
            Style::default().fg(Color::DarkGray),
        )))];
        let mut selected_item = None;
        let mut song_index = 0;

        for group in &library.grouped.groups {
            if library.view.group_by.is_some() {
                items.push(ListItem::new(Line::from(Span::styled(
                    format!("{} ({})", group.name, group.songs.len()),
                    heading_style,
                ))));
            }
            for song in &group.songs {
                if song_index == library.selected {
                    selected_item = Some(items.len());
                }
                items.push(ListItem::new(song_row(song)));
                song_index += 1;
            }
        }

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        let mut state = ListState::default();
        state.select(selected_item);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let keys: Vec<(&str, &str)> = match (&self.screen, &self.mode) {
            (Screen::Login(_), _) => vec![
                ("[Tab]", " Switch field   "),
                ("[Enter]", " Sign in   "),
                ("[Esc]", " Quit"),
            ],
            (_, Mode::Searching(_)) => vec![
                ("[type]", " Filter   "),
                ("[↑↓]", " Navigate   "),
                ("[Enter]", " Keep   "),
                ("[Esc]", " Clear"),
            ],
            (_, Mode::AddingSong(_)) => vec![
                ("[Tab]", " Next field / accept genre   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Cancel"),
            ],
            (_, Mode::ConfirmSongDelete(_)) | (_, Mode::ConfirmRestore) => {
                vec![("[y]", " Yes   "), ("[n]", " No")]
            }
            (Screen::Library(_), Mode::Normal) => {
                let mut keys = vec![
                    ("[↑↓]", " Navigate   "),
                    ("[/]", " Search   "),
                    ("[g]", " Genre   "),
                    ("[s]", " Sort   "),
                    ("[o]", " Order   "),
                    ("[b]", " Group   "),
                    ("[r]", " Reset   "),
                    ("[i]", " Info   "),
                ];
                if self.auth.is_admin() {
                    keys.extend([
                        ("[+]", " Add   "),
                        ("[-]", " Delete   "),
                        ("[R]", " Restore all   "),
                    ]);
                }
                keys.extend([("[L]", " Logout   "), ("[q]", " Quit")]);
                keys
            }
        };

        let spans: Vec<Span<'static>> = keys
            .into_iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(key.to_string(), key_style()),
                    Span::raw(label.to_string()),
                ]
            })
            .collect();
        Line::from(spans)
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, query: &str) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Search title, artist or album");
        let paragraph = Paragraph::new(Span::raw(format!("Search: {query}")))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x = inner.x + "Search: ".len() as u16 + query.chars().count() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn draw_song_form(&self, frame: &mut Frame, area: Rect, form: &SongForm) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Song").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = SongField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let prefix = form.active.label().len() as u16 + 2;
        frame.set_cursor_position((
            inner.x + prefix + form.value_len(form.active) as u16,
            inner.y + form.active_row(),
        ));
    }

    fn draw_confirm(&self, frame: &mut Frame, area: Rect, title: &str, mut lines: Vec<Line>) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("[y]", key_style()),
            Span::raw(" Yes   "),
            Span::styled("[n]", key_style()),
            Span::raw(" No"),
        ]));

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(paragraph, popup_area);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    fn open_library(&mut self, role: Role) {
        self.screen = Screen::Library(LibraryScreen::new(self.catalog.songs()));
        self.mode = Mode::Normal;
        let user = self
            .auth
            .session()
            .map(|s| s.user.clone())
            .unwrap_or_default();
        self.set_status(format!("Signed in as {user} ({role})."), StatusKind::Info);
    }

    fn save_new_song(&mut self, form: &SongForm) -> Result<()> {
        let song = form.parse_inputs()?;
        if let Some(song) = self.catalog.add(&self.auth, song)? {
            self.refresh_library(Some(song.id));
            self.set_status(
                format!("Added {}.", song.display_title()),
                StatusKind::Info,
            );
        }
        Ok(())
    }

    /// Re-derive the listing after a catalog change, optionally moving the
    /// selection onto `focus_id` when it is visible.
    fn refresh_library(&mut self, focus_id: Option<i64>) {
        let Screen::Library(library) = &mut self.screen else {
            return;
        };
        library.refresh(self.catalog.songs());

        if let Some(id) = focus_id {
            if let Some(idx) = library.grouped.iter_songs().position(|s| s.id == id) {
                library.selected = idx;
            }
        }
    }
}

fn draw_info(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from("Browse the catalog, search it, and slice it by genre, sort order and grouping."),
        Line::from("  • Role-based sign-in (Admin / User)"),
        Line::from("  • Adding, deleting and restoring songs (Admin only)"),
        Line::from("  • Search, genre filter, sorting and grouping for everyone"),
        Line::from("Changes are saved as soon as they are made."),
    ];
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("About").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_controls(frame: &mut Frame, area: Rect, library: &LibraryScreen) {
    let view = &library.view;
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().add_modifier(Modifier::BOLD);

    let search = if view.search_term.is_empty() {
        "—".to_string()
    } else {
        format!("\"{}\"", view.search_term)
    };
    let genre = if view.filter_genre.is_empty() {
        "All Genres".to_string()
    } else {
        view.filter_genre.clone()
    };
    let order = match view.sort_order {
        crate::view::SortOrder::Asc => "Ascending",
        crate::view::SortOrder::Desc => "Descending",
    };
    let group = match view.group_by {
        Some(key) => key.to_string(),
        None => "No Grouping".to_string(),
    };

    let line = Line::from(vec![
        Span::styled("Search ", label),
        Span::styled(search, value),
        Span::styled("   Genre ", label),
        Span::styled(genre, value),
        Span::styled("   Sort ", label),
        Span::styled(format!("{} ({order})", view.sort_by), value),
        Span::styled("   Group ", label),
        Span::styled(group, value),
        Span::styled(format!("   {}", library.summary()), Style::default().fg(Color::Green)),
    ]);

    let controls = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(controls, area);
}

fn song_columns(cells: [&str; 6]) -> String {
    let mut row = String::new();
    for (cell, width) in cells.iter().zip(COLUMNS) {
        row.push_str(&fit_column(cell, width));
        row.push(' ');
    }
    row.push_str(cells[5]);
    row
}

fn song_row(song: &Song) -> Line<'static> {
    let year = song.year.to_string();
    Line::from(song_columns([
        &song.title,
        &song.artist,
        &song.album,
        &song.genre,
        &year,
        &song.duration,
    ]))
}
