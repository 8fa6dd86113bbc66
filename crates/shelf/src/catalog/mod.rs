//! Catalog storage and organization for the document library.
//!
//! This module owns the persistent relational schema (documents and the
//! folder forest they are filed under) and every read/write primitive over
//! it. Uniqueness and referential constraints are enforced here: document
//! titles, content locations, and external ids are globally unique, folder
//! names are unique among siblings, and no document can ever reference a
//! folder that does not exist.
//!
//! The catalog is an explicit store instance with an open/close lifecycle:
//! the application entry point constructs one [`Catalog`] and threads it
//! through the orchestrator and the UI layer. There is no process-wide
//! connection, which keeps tests isolated on ephemeral stores.
//!
//! All operations are synchronous; only the network-bound ingestion handlers
//! in [`crate::ingest`] run asynchronously, and they never touch the catalog
//! directly.
//!
//! # Examples
//!
//! ```no_run
//! use shelf::catalog::Catalog;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut catalog = Catalog::open(Catalog::default_path())?;
//! let reading = catalog.insert_folder("Reading", None)?;
//! for doc in catalog.search("attention")? {
//!   println!("{} ({})", doc.title, doc.content_location);
//! }
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, warn};

use crate::{
  document::{Document, Folder, NewDocument},
  error::{Result, ShelfError},
};

mod documents;
mod folders;
#[cfg(test)] mod tests;

pub use folders::DeletePolicy;

/// Name of the distinguished default folder.
///
/// Seeded at open, undeletable, and the reparent target when another folder
/// is deleted with [`DeletePolicy::ReparentToDefault`].
pub const DEFAULT_FOLDER_NAME: &str = "Unsorted";

/// Columns selected for every document read, in [`Document`] field order.
const DOCUMENT_COLUMNS: &str = "id, external_id, title, authors, abstract, \
                                content_location, source_url, added_at, last_viewed_at, folder_id";

/// Handle to an open catalog database.
pub struct Catalog {
  conn:           Connection,
  /// Id of the [`DEFAULT_FOLDER_NAME`] folder, resolved once at open.
  default_folder: i64,
}

impl Catalog {
  /// Opens an existing catalog or creates a new one at the specified path.
  ///
  /// This method will:
  /// 1. Create parent directories as needed
  /// 2. Copy a pre-existing catalog file to a sibling backup path
  /// 3. Initialize the schema using migrations
  /// 4. Seed the default folder if absent
  ///
  /// The backup copy is a best-effort safety net taken before the file is
  /// opened for writes, not a transactional guarantee; a failed backup is
  /// logged and does not block opening.
  ///
  /// # Errors
  ///
  /// Fails if the file cannot be created or the schema cannot be applied.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      if !parent.as_os_str().is_empty() {
        std::fs::create_dir_all(parent)?;
      }
    }
    backup_existing(path);

    let conn = Connection::open(path)?;
    conn
      .execute_batch(include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/migrations/init.sql")))?;

    let default_folder = seed_default_folder(&conn)?;
    debug!("Opened catalog at {} (default folder id {default_folder})", path.display());
    Ok(Self { conn, default_folder })
  }

  /// Returns the default path for the catalog file.
  ///
  /// The path is constructed as follows:
  /// - On Unix: `~/.local/share/shelf/shelf.db`
  /// - On macOS: `~/Library/Application Support/shelf/shelf.db`
  /// - On Windows: `%APPDATA%\shelf\shelf.db`
  /// - Fallback: `./shelf.db` in the current directory
  pub fn default_path() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("shelf").join("shelf.db")
  }

  /// Id of the default folder, always present in an open catalog.
  pub fn default_folder_id(&self) -> i64 { self.default_folder }
}

/// Copies the catalog file to `<name>.backup` next to it, best effort.
fn backup_existing(path: &Path) {
  if !path.exists() {
    return;
  }
  let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
  name.push(".backup");
  let backup = path.with_file_name(name);
  if let Err(e) = std::fs::copy(path, &backup) {
    warn!("Could not back up catalog to {}: {e}", backup.display());
  }
}

/// Inserts the default folder if missing and returns its id.
fn seed_default_folder(conn: &Connection) -> Result<i64> {
  conn.execute(
    "INSERT OR IGNORE INTO folders (name, parent_id) VALUES (?1, NULL)",
    params![DEFAULT_FOLDER_NAME],
  )?;
  let id = conn.query_row(
    "SELECT id FROM folders WHERE name = ?1 AND parent_id IS NULL",
    params![DEFAULT_FOLDER_NAME],
    |row| row.get(0),
  )?;
  Ok(id)
}

impl Document {
  /// Builds a document from a row selected with [`DOCUMENT_COLUMNS`].
  fn from_row(row: &Row) -> rusqlite::Result<Self> {
    Ok(Self {
      id:               row.get(0)?,
      external_id:      row.get(1)?,
      title:            row.get(2)?,
      authors:          row.get(3)?,
      abstract_text:    row.get(4)?,
      content_location: row.get(5)?,
      source_url:       row.get(6)?,
      added_at:         row.get(7)?,
      last_viewed_at:   row.get(8)?,
      folder_id:        row.get(9)?,
    })
  }
}

impl Folder {
  /// Builds a folder from an `id, name, parent_id` row.
  fn from_row(row: &Row) -> rusqlite::Result<Self> {
    Ok(Self { id: row.get(0)?, name: row.get(1)?, parent_id: row.get(2)? })
  }
}
