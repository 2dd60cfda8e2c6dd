use std::{path::PathBuf, time::Duration};

use errors::DirectoryError;

pub mod config;
pub mod errors;
pub mod logger;
pub mod search;

/// Get the location of the config directory of tyne.
///
/// On Linux this is `$XDG_CONFIG_HOME/tyne` or `~/.config/tyne`.
///
/// # Errors
///
/// Fails if no home directory could be found for the current user.
#[inline]
pub fn get_config_dir() -> Result<PathBuf, DirectoryError> {
    directories::ProjectDirs::from("", "", "tyne")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(DirectoryError::Config)
}

/// Get the location of the data directory of tyne, where the catalogue database lives by default.
///
/// On Linux this is `$XDG_DATA_HOME/tyne` or `~/.local/share/tyne`.
///
/// # Errors
///
/// Fails if no home directory could be found for the current user.
#[inline]
pub fn get_data_dir() -> Result<PathBuf, DirectoryError> {
    directories::ProjectDirs::from("", "", "tyne")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(DirectoryError::Data)
}

/// Format a [`Duration`] as `seconds.milliseconds`, e.g. `12.034`.
#[must_use]
pub fn format_duration(duration: &Duration) -> String {
    format!("{}.{:03}", duration.as_secs(), duration.subsec_millis())
}
