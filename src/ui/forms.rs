use chrono::Datelike;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{NewSong, Song};

/// Fields on the sign-in screen.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum LoginField {
    #[default]
    Username,
    Password,
}

/// Sign-in form state. The password is only ever rendered masked.
#[derive(Default, Clone)]
pub(crate) struct LoginForm {
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) active: LoginField,
    pub(crate) error: Option<String>,
}

impl LoginForm {
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            LoginField::Username => self.username.push(ch),
            LoginField::Password => self.password.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            LoginField::Username => {
                self.username.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
        }
    }

    /// Clear the password after a failed attempt, keeping the username.
    pub(crate) fn reject(&mut self, message: String) {
        self.password.clear();
        self.active = LoginField::Password;
        self.error = Some(message);
    }

    pub(crate) fn build_line(&self, field_name: &str, field: LoginField) -> Line<'static> {
        let (display, is_empty) = match field {
            LoginField::Username => (self.username.clone(), self.username.is_empty()),
            LoginField::Password => ("*".repeat(self.password.chars().count()), self.password.is_empty()),
        };
        let is_active = self.active == field;

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if is_empty {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        let display = if is_empty && !is_active {
            "<required>".to_string()
        } else {
            display
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    pub(crate) fn value_len(&self, field: LoginField) -> usize {
        match field {
            LoginField::Username => self.username.chars().count(),
            LoginField::Password => self.password.chars().count(),
        }
    }
}

/// Why the add-song form refused to submit.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub(crate) enum SongInputError {
    #[error("{0} is required.")]
    Missing(&'static str),
    #[error("Duration must look like 3:45, got `{0}`.")]
    InvalidDuration(String),
}

/// Fields of the add-song form, in focus order.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum SongField {
    #[default]
    Title,
    Artist,
    Album,
    Genre,
    Year,
    Duration,
}

impl SongField {
    pub(crate) const ALL: [SongField; 6] = [
        SongField::Title,
        SongField::Artist,
        SongField::Album,
        SongField::Genre,
        SongField::Year,
        SongField::Duration,
    ];

    pub(crate) fn label(&self) -> &'static str {
        match self {
            SongField::Title => "Title",
            SongField::Artist => "Artist",
            SongField::Album => "Album",
            SongField::Genre => "Genre",
            SongField::Year => "Year",
            SongField::Duration => "Duration",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }
}

/// Form state for adding a song, including genre auto-complete.
#[derive(Default, Clone)]
pub(crate) struct SongForm {
    pub(crate) title: String,
    pub(crate) artist: String,
    pub(crate) album: String,
    pub(crate) genre: String,
    pub(crate) year: String,
    pub(crate) duration: String,
    pub(crate) active: SongField,
    pub(crate) error: Option<String>,
    pub(crate) suggestion: Option<String>,
    pub(crate) autocomplete_disabled: bool,
}

impl SongForm {
    fn value(&self, field: SongField) -> &String {
        match field {
            SongField::Title => &self.title,
            SongField::Artist => &self.artist,
            SongField::Album => &self.album,
            SongField::Genre => &self.genre,
            SongField::Year => &self.year,
            SongField::Duration => &self.duration,
        }
    }

    fn value_mut(&mut self, field: SongField) -> &mut String {
        match field {
            SongField::Title => &mut self.title,
            SongField::Artist => &mut self.artist,
            SongField::Album => &mut self.album,
            SongField::Genre => &mut self.genre,
            SongField::Year => &mut self.year,
            SongField::Duration => &mut self.duration,
        }
    }

    /// Move focus forward (or backward) through the fields, wrapping around.
    pub(crate) fn cycle_field(&mut self, forward: bool) {
        let len = SongField::ALL.len();
        let idx = self.active.index();
        let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
        self.active = SongField::ALL[next];
        if self.active != SongField::Genre {
            self.suggestion = None;
        }
    }

    /// Insert a character into the active field. The year only takes digits.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            SongField::Year if !ch.is_ascii_digit() => return false,
            SongField::Genre => self.autocomplete_disabled = false,
            _ => {}
        }
        let field = self.active;
        self.value_mut(field).push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        let field = self.active;
        self.value_mut(field).pop();
        if field == SongField::Genre {
            self.autocomplete_disabled = false;
        }
    }

    /// Validate the inputs and build the song to add. A year that does not fit
    /// a number falls back to the current calendar year.
    pub(crate) fn parse_inputs(&self) -> Result<NewSong, SongInputError> {
        for field in SongField::ALL {
            if self.value(field).trim().is_empty() {
                return Err(SongInputError::Missing(field.label()));
            }
        }

        let duration = self.duration.trim();
        if !is_duration(duration) {
            return Err(SongInputError::InvalidDuration(duration.to_string()));
        }

        let year = self
            .year
            .trim()
            .parse::<i32>()
            .unwrap_or_else(|_| chrono::Local::now().year());

        Ok(NewSong {
            title: self.title.trim().to_string(),
            artist: self.artist.trim().to_string(),
            album: self.album.trim().to_string(),
            genre: self.genre.trim().to_string(),
            year,
            duration: duration.to_string(),
        })
    }

    /// Suggest an existing genre that starts with what was typed so far.
    pub(crate) fn update_suggestion(&mut self, genres: &[String]) {
        if self.active != SongField::Genre
            || self.autocomplete_disabled
            || self.genre.is_empty()
        {
            self.suggestion = None;
            return;
        }

        let current_lower = self.genre.to_lowercase();
        self.suggestion = genres
            .iter()
            .find(|candidate| candidate.to_lowercase().starts_with(&current_lower))
            .filter(|candidate| candidate.to_lowercase() != current_lower)
            .cloned();
    }

    /// Take the suggested genre. Returns false when there was nothing to take.
    pub(crate) fn accept_suggestion(&mut self) -> bool {
        if self.suggestion_suffix().is_none() {
            return false;
        }
        match self.suggestion.take() {
            Some(candidate) => {
                self.genre = candidate;
                self.autocomplete_disabled = true;
                true
            }
            None => false,
        }
    }

    pub(crate) fn cancel_autocomplete(&mut self) -> bool {
        if self.has_active_suggestion() {
            self.autocomplete_disabled = true;
            self.suggestion = None;
            return true;
        }
        false
    }

    /// Remaining characters of the suggestion, shown ghosted after the cursor.
    pub(crate) fn suggestion_suffix(&self) -> Option<String> {
        let candidate = self.suggestion.as_ref()?;
        let suffix: String = candidate.chars().skip(self.genre.chars().count()).collect();
        if suffix.is_empty() {
            None
        } else {
            Some(suffix)
        }
    }

    pub(crate) fn has_active_suggestion(&self) -> bool {
        self.active == SongField::Genre && self.suggestion.is_some()
    }

    pub(crate) fn build_line(&self, field: SongField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        let display = if value.is_empty() && !is_active {
            match field {
                SongField::Duration => "<e.g. 3:45>".to_string(),
                _ => "<required>".to_string(),
            }
        } else {
            value.clone()
        };

        let mut spans = vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ];
        if field == SongField::Genre && is_active {
            if let Some(suffix) = self.suggestion_suffix() {
                spans.push(Span::styled(suffix, Style::default().fg(Color::DarkGray)));
            }
        }

        Line::from(spans)
    }

    pub(crate) fn value_len(&self, field: SongField) -> usize {
        self.value(field).chars().count()
    }

    /// Row of the active field inside the form, for cursor placement.
    pub(crate) fn active_row(&self) -> u16 {
        self.active.index() as u16
    }
}

/// `M:SS` (any number of minute digits, seconds 00-59).
fn is_duration(text: &str) -> bool {
    let Some((minutes, seconds)) = text.split_once(':') else {
        return false;
    };
    !minutes.is_empty()
        && minutes.chars().all(|c| c.is_ascii_digit())
        && seconds.len() == 2
        && seconds.chars().all(|c| c.is_ascii_digit())
        && seconds < "60"
}

/// State for confirming a song deletion.
pub(crate) struct ConfirmSongDelete {
    pub(crate) song: Song,
}
