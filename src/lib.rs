//! Core library surface for the Music Library TUI application.
//!
//! The `bin` target wires these pieces together; keeping them in a library
//! lets the integration tests drive the catalog, the view engine and the
//! sign-in gate without a terminal.
pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod ui;
pub mod view;

/// Sign-in state and the role check the catalog relies on.
pub use auth::{AuthGate, HmacTokenCodec, RoleSource, SystemClock};

/// The persisted song list.
pub use catalog::CatalogStore;

pub use config::Config;
pub use db::Storage;

/// The domain types that other layers manipulate.
pub use models::{default_songs, NewSong, Role, Song};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};

pub use view::{GroupKey, GroupedSongs, SortKey, SortOrder, ViewState};
