//! Personal research-paper library management.
//!
//! `shelf` is the ingestion and catalog engine behind a desktop document
//! library, providing:
//!
//! - Ingestion from heterogeneous sources (arXiv abstract pages, article
//!   platforms, generic remote documents, local files and directories)
//! - A relational catalog of document metadata organized into a folder
//!   hierarchy
//! - Deduplication and referential integrity across every write path
//! - Reorganization: move, rename, delete, and recent-activity tracking
//!
//! # Getting Started
//!
//! ```no_run
//! use shelf::{
//!   catalog::Catalog,
//!   ingest::{IngestOutcome, Ingestor},
//!   prelude::*,
//!   storage,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!   // Open (or create) a catalog.
//!   let mut catalog = Catalog::open(Catalog::default_path())?;
//!
//!   // Ingest an arXiv paper into a folder.
//!   let ingestor = Ingestor::new(storage::default_storage_path())?;
//!   let reading = catalog.insert_folder("Reading", None)?;
//!   match ingestor.ingest(&mut catalog, "https://arxiv.org/abs/1706.03762", reading.id).await? {
//!     IngestOutcome::Added(doc) => println!("Added: {}", doc.title),
//!     IngestOutcome::Duplicate(report) =>
//!       println!("Already have \"{}\" in {}", report.title, report.folder),
//!     IngestOutcome::Imported(summary) => println!("Imported {} files", summary.added.len()),
//!   }
//!
//!   // Restore the last-viewed document on the next launch.
//!   if let Some(doc) = catalog.most_recent()? {
//!     println!("Resume with {}", doc.content_location);
//!   }
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`catalog`]: the relational store, folder tree, and recency tracking
//! - [`document`]: document and folder domain types
//! - [`source`]: classification of raw inputs into source kinds
//! - [`ingest`]: per-source handlers and the ingestion orchestrator
//! - [`storage`]: the managed storage root for retrieved content
//! - [`prelude`]: common traits and types for ergonomic imports
//!
//! # Design Philosophy
//!
//! - An explicit store instance with an explicit lifecycle: no hidden
//!   global connection, so tests run against ephemeral catalogs
//! - A closed set of source kinds selected by a single classification
//!   function, one handler per kind
//! - Conflicts are named outcomes, never silent overwrites or duplicates
//! - No partial state: content lands via temp-write-and-rename, and rows
//!   are inserted only after content is fully in place

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

pub mod catalog;
pub mod document;
pub mod error;
pub mod ingest;
pub mod source;
pub mod storage;

/// Common traits and types for ergonomic imports.
///
/// # Usage
///
/// ```no_run
/// use shelf::{catalog::Catalog, prelude::*};
///
/// fn example() -> Result<()> {
///   let catalog = Catalog::open("shelf.db")?;
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    document::{Document, Folder, NewDocument},
    error::{Result, ShelfError},
    source::SourceKind,
  };
}
