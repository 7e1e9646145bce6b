mod config;
mod store;

pub use config::Config;
pub use store::{CompletionStore, Database, LAST_COMPLETED_KEY};

use std::path::PathBuf;

/// Returns `~/.config/dailyhold[-dev]/` based on DAILYHOLD_ENV.
///
/// Set DAILYHOLD_ENV=dev to use a separate development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DAILYHOLD_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("dailyhold-dev")
    } else {
        base_dir.join("dailyhold")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
