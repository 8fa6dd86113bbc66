//! Error types for the shelf CLI.

use thiserror::Error;

/// Error type alias used for the CLI.
pub type Result<T> = core::result::Result<T, ShelfdError>;

/// Errors surfaced by the CLI on top of the library's own.
#[derive(Error, Debug)]
pub enum ShelfdError {
  /// An error propagated from the shelf library.
  #[error(transparent)]
  Shelf(#[from] shelf::error::ShelfError),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// An interactive prompt failed.
  #[error(transparent)]
  Dialog(#[from] dialoguer::Error),
}
