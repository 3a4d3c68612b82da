//! Default path resolution for the data file and CLI configuration
//!
//! Uses XDG Base Directory locations when available, with fallbacks relative
//! to the current directory.

use std::path::PathBuf;

/// File name of the record store inside the data directory
pub const DATA_FILE_NAME: &str = "sleep_records.csv";

/// Returns the default path for the CLI configuration file.
///
/// - Linux: `~/.config/sleeplog/config.toml`
/// - Fallback: `./.sleeplog/config.toml`
pub fn default_config_path() -> PathBuf {
    app_dir(dirs::config_dir()).join("config.toml")
}

/// Returns the default directory holding the record store.
///
/// - Linux: `~/.local/share/sleeplog`
/// - Fallback: `./.sleeplog`
pub fn default_data_dir() -> PathBuf {
    app_dir(dirs::data_dir())
}

/// Returns the default record store path.
pub fn default_data_file() -> PathBuf {
    default_data_dir().join(DATA_FILE_NAME)
}

/// `<base>/sleeplog`, or `./.sleeplog` when there is no base directory.
fn app_dir(base: Option<PathBuf>) -> PathBuf {
    base.map(|dir| dir.join("sleeplog"))
        .unwrap_or_else(|| PathBuf::from(".sleeplog"))
}
