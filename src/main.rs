//! Binary entry point: resolve the data directory, load configuration, start
//! logging, open storage, restore any saved session and catalog, then drive
//! the Ratatui event loop until the user exits.
use std::rc::Rc;

use music_library::config::data_dir;
use music_library::{
    logging, run_app, App, AuthGate, CatalogStore, Config, HmacTokenCodec, Storage, SystemClock,
};

/// Returning a `Result` bubbles up fatal initialization problems (for example
/// an unwritable data directory or a broken `config.toml`) to the terminal
/// instead of crashing silently.
fn main() -> anyhow::Result<()> {
    let data_dir = data_dir()?;
    let config = Config::load(&data_dir)?;
    let log_path = logging::init(&data_dir, &config.log_filter)?;
    tracing::info!(data_dir = %data_dir.display(), log = %log_path.display(), "music library starting");

    let storage = Rc::new(Storage::open(&config.database_path(&data_dir))?);

    let mut auth = AuthGate::new(
        Rc::clone(&storage),
        Box::new(HmacTokenCodec::new(config.token_secret.as_bytes())),
        Box::new(SystemClock),
        config.token_ttl_secs(),
    );
    auth.restore()?;

    let catalog = CatalogStore::load(storage)?;

    let mut app = App::new(auth, catalog);
    let result = run_app(&mut app);
    if let Err(err) = &result {
        tracing::error!(error = %err, "exiting with error");
    }
    result
}
