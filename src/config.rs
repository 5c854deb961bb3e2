//! Optional `config.toml` in the data directory. Every field has a default, so
//! a missing file (or a file with only some keys) is fine.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".music-library";
/// Environment variable that relocates the whole data directory.
pub const HOME_ENV: &str = "MUSIC_LIBRARY_HOME";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOG_FILE_NAME: &str = "music-library.log";
/// Longest accepted sign-in lifetime: ten years.
pub const MAX_TOKEN_TTL_HOURS: i64 = 10 * 365 * 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// `tracing` filter directive; `RUST_LOG` wins when set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// How long a sign-in stays valid across restarts.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    /// Key used to sign session tokens.
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
    /// SQLite file name, relative to the data directory.
    #[serde(default = "default_database_file")]
    pub database_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            token_ttl_hours: default_token_ttl_hours(),
            token_secret: default_token_secret(),
            database_file: default_database_file(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_token_ttl_hours() -> i64 {
    24
}

fn default_token_secret() -> String {
    "music-library-local-secret".to_string()
}

fn default_database_file() -> String {
    "library.sqlite".to_string()
}

impl Config {
    /// Read `config.toml` from `data_dir`, or fall back to defaults when the
    /// file does not exist. A file that exists but does not parse is an error.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config =
            toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))?;

        if config.token_ttl_hours <= 0 {
            return Err(anyhow!("token_ttl_hours must be positive"));
        }
        if config.token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(anyhow!("token_ttl_hours must be at most {MAX_TOKEN_TTL_HOURS}"));
        }
        Ok(config)
    }

    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl_hours.saturating_mul(3_600)
    }

    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.database_file)
    }
}

/// Resolve the data directory: `$MUSIC_LIBRARY_HOME` if set, otherwise
/// `~/.music-library`.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.token_ttl_secs(), 24 * 3_600);
        assert_eq!(
            config.database_path(dir.path()),
            dir.path().join("library.sqlite")
        );
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "token_ttl_hours = 2\nlog_filter = \"debug\"\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.token_ttl_hours, 2);
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.database_file, "library.sqlite");
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "token_ttl_hours = \"soon\"").unwrap();
        assert!(Config::load(dir.path()).is_err());

        fs::write(dir.path().join(CONFIG_FILE_NAME), "token_ttl_hours = 0").unwrap();
        assert!(Config::load(dir.path()).is_err());

        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            format!("token_ttl_hours = {}", i64::MAX),
        )
        .unwrap();
        assert!(Config::load(dir.path()).is_err());

        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            format!("token_ttl_hours = {MAX_TOKEN_TTL_HOURS}"),
        )
        .unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.token_ttl_secs(), MAX_TOKEN_TTL_HOURS * 3_600);
    }
}
