//! Core document and folder types for the catalog.
//!
//! This module provides the fundamental types produced by the ingestion
//! pipeline and stored by the catalog:
//!
//! - [`NewDocument`]: a normalized metadata record produced by a source
//!   handler, not yet persisted.
//! - [`Document`]: a persisted catalog row with its surrogate id, timestamps,
//!   and folder placement.
//! - [`Folder`]: a node in the folder forest documents are filed under.
//!
//! # Examples
//!
//! ```
//! use shelf::document::NewDocument;
//!
//! let record = NewDocument {
//!   external_id:      "2301.07041".into(),
//!   title:            "Verifiable Fully Homomorphic Encryption".into(),
//!   authors:          Some("Alexander Viand, Christian Knabenhans".into()),
//!   abstract_text:    Some("Fully Homomorphic Encryption (FHE) is seeing...".into()),
//!   content_location: "/papers/2301.07041.pdf".into(),
//!   source_url:       Some("https://arxiv.org/abs/2301.07041".into()),
//! };
//! assert!(!record.title.is_empty());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized metadata record produced by an ingestion handler.
///
/// Every source handler (arXiv scrape, known-article host, generic document
/// fetch, local file) reduces its input to this shape. The orchestrator then
/// runs the dedup check and persists it, yielding a [`Document`]. Handlers
/// never touch the catalog themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDocument {
  /// Source-scoped identifier: an arXiv id, or a generated unique token for
  /// sources without a natural one. Unique across the catalog.
  pub external_id:      String,
  /// Document title; must be non-empty and is unique across the catalog.
  pub title:            String,
  /// Comma-separated author list, absent for non-academic sources.
  pub authors:          Option<String>,
  /// Abstract text, absent for non-academic sources.
  pub abstract_text:    Option<String>,
  /// Either a filesystem path under the managed storage root or a remote
  /// URL. Unique across the catalog.
  pub content_location: String,
  /// The original remote URL the content was fetched from, retained even
  /// after local caching so the content can be re-fetched if the local copy
  /// goes missing.
  pub source_url:       Option<String>,
}

/// A persisted catalog row: a paper or saved page filed under a folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
  /// Surrogate key, assigned at insert, immutable.
  pub id:               i64,
  /// Source-scoped identifier, unique across the catalog.
  pub external_id:      String,
  /// Non-empty title, unique across the catalog.
  pub title:            String,
  /// Comma-separated author list, if known.
  pub authors:          Option<String>,
  /// Abstract text, if known.
  pub abstract_text:    Option<String>,
  /// Local path or remote URL, unique across the catalog.
  pub content_location: String,
  /// Original remote URL, if the content was fetched.
  pub source_url:       Option<String>,
  /// Creation timestamp, set once at insert.
  pub added_at:         DateTime<Utc>,
  /// Updated every time the document is opened.
  pub last_viewed_at:   Option<DateTime<Utc>>,
  /// Folder the document is filed under; always references an existing
  /// folder.
  pub folder_id:        i64,
}

/// A node in the folder hierarchy.
///
/// The folder graph is a forest: `parent_id` chains terminate at a null root
/// and names are unique among siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
  /// Surrogate key.
  pub id:        i64,
  /// Folder name, unique among siblings.
  pub name:      String,
  /// Parent folder, `None` for top-level folders.
  pub parent_id: Option<i64>,
}
