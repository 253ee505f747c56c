mod config;
pub mod input;

pub use config::Config;
pub use input::StudyInput;

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/studyload[-dev]/` based on STUDYLOAD_ENV.
///
/// Set STUDYLOAD_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDYLOAD_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studyload-dev")
    } else {
        base_dir.join("studyload")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
