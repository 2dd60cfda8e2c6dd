use thiserror::Error;
use tyne_storage::errors::Error;

/// Errors that can occur with finding the config or data directories.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Unable to find the config directory for tyne.")]
    Config,
    #[error("Unable to find the data directory for tyne.")]
    Data,
}

/// Errors that can occur while searching the catalogue.
///
/// A term that matches nothing is not an error, only failures of the store are.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Database error: {0}")]
    Database(#[from] Error),
}
