//! Ratatui front-end: a sign-in screen and the library screen, driven by one
//! [`App`] state machine.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
