//! Persistence module: the SQLite connection plus the key/value layer on top.

mod connection;
mod storage;

pub use connection::{ensure_schema, open_in_memory};
pub use storage::{Storage, SONGS_KEY, TOKEN_KEY};
