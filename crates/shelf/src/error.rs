//! Error types for the shelf library.
//!
//! This module provides a comprehensive error type that encompasses all possible
//! failure modes when ingesting and cataloging documents, including:
//! - Input validation (malformed identifiers, empty titles)
//! - Catalog uniqueness conflicts
//! - Network retrieval failures
//! - Page-structure scraping failures
//!
//! # Examples
//!
//! ```
//! use shelf::{error::ShelfError, source::classify};
//!
//! match classify("https://arxiv.org/abs/bogus") {
//!   Err(ShelfError::InvalidIdentifier) => println!("Not a valid arXiv id"),
//!   Err(e) => println!("Other error: {e}"),
//!   Ok(kind) => println!("Classified as {kind:?}"),
//! }
//! ```

use thiserror::Error;

/// Error type alias used for the [`shelf`](crate) crate.
pub type Result<T> = core::result::Result<T, ShelfError>;

/// Errors that can occur when working with the shelf library.
///
/// Variants fall into a few families with different handling contracts:
///
/// - [`InvalidIdentifier`](ShelfError::InvalidIdentifier) and
///   [`Validation`](ShelfError::Validation) are rejected before any network or
///   storage side effect.
/// - [`Conflict`](ShelfError::Conflict) is a named outcome, not a fault: the
///   catalog refused a row that would violate a uniqueness invariant, and the
///   existing row is untouched.
/// - [`Network`](ShelfError::Network) and [`Fetch`](ShelfError::Fetch) are
///   retryable at the caller's discretion.
/// - [`Scrape`](ShelfError::Scrape) means an expected page structure was
///   absent; it fails the single ingestion but never aborts a batch.
#[derive(Error, Debug)]
pub enum ShelfError {
  /// The provided identifier doesn't match the expected format.
  ///
  /// Raised when an arXiv URL does not carry a `\d{4}.\d{4,5}` id, before any
  /// network call is made.
  #[error("Invalid identifier format")]
  InvalidIdentifier,

  /// Input failed shape validation, e.g. an empty title.
  #[error("{0}")]
  Validation(String),

  /// A catalog uniqueness invariant would be violated.
  ///
  /// The payload names the colliding value (usually a title or content
  /// location) so the caller can surface which record already exists.
  #[error("\"{0}\" is already in the catalog")]
  Conflict(String),

  /// A network request failed at the transport level.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// A fetch completed but did not yield a usable response.
  ///
  /// Covers non-2xx statuses and timeouts surfaced with context the raw
  /// transport error lacks.
  #[error("Fetch failed: {0}")]
  Fetch(String),

  /// An expected structure was missing from a scraped page.
  ///
  /// For arXiv this means the abstract container, title heading, author list,
  /// or abstract block was absent: the page layout changed or the id does
  /// not exist.
  #[error("Scrape failed: {0}")]
  Scrape(String),

  /// A remote resource was fetched but is not an importable document format.
  ///
  /// No file is written when this is raised.
  #[error("Unsupported content type: {0}")]
  UnsupportedContent(String),

  /// The named folder does not exist in the catalog.
  #[error("No folder named \"{0}\"")]
  FolderNotFound(String),

  /// The named document does not exist in the catalog.
  #[error("No document matching \"{0}\"")]
  DocumentNotFound(String),

  /// A SQLite operation failed.
  ///
  /// This wraps errors from the `rusqlite` crate, covering SQL errors,
  /// constraint violations, and type conversion failures that are not
  /// reinterpreted as [`Conflict`](ShelfError::Conflict).
  #[error(transparent)]
  Sqlite(#[from] rusqlite::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Path(#[from] std::io::Error),
}

impl ShelfError {
  /// Whether an underlying SQLite error is a uniqueness-constraint violation.
  ///
  /// The catalog uses this to translate constraint failures into
  /// [`Conflict`](ShelfError::Conflict) outcomes instead of opaque database
  /// errors.
  pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
      err,
      rusqlite::Error::SqliteFailure(e, _)
        if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
  }
}
