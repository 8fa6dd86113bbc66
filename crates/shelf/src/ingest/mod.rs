//! The ingestion pipeline: classify, handle, dedup, persist.
//!
//! [`Ingestor`] is the orchestrator and the only component that touches both
//! the source handlers and the catalog. Given a user-supplied input and a
//! target folder it runs:
//!
//! 1. [`classify`](crate::source::classify), deciding which handler applies
//! 2. the handler, producing a normalized [`NewDocument`], fetching or
//!    copying content into the managed storage root when the source is
//!    remote
//! 3. a conflict check against the catalog (same title or content location)
//! 4. the insert
//!
//! A duplicate is a named outcome ([`IngestOutcome::Duplicate`]), never a
//! silent overwrite and never a second row. Directory imports apply the same
//! per-file check but skip conflicts quietly, so re-running a bulk import
//! over an already-imported tree inserts only new files.
//!
//! Network handlers are async and long-latency; the catalog steps are fast
//! and synchronous. Remote content is always written via a temporary path
//! and renamed on completion, and a row is inserted only after the file
//! write finishes, so an abandoned fetch leaves neither a partial file nor a
//! partial row.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use tracing::{debug, warn};

use crate::{
  catalog::Catalog,
  document::{Document, NewDocument},
  error::{Result, ShelfError},
  source::{classify, SourceKind},
};

mod article;
mod arxiv;
mod local;
mod web;

/// Bound on every network fetch; expiry surfaces as a fetch error.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// The result of a single ingestion.
#[derive(Debug)]
pub enum IngestOutcome {
  /// A new document was inserted.
  Added(Document),
  /// The input was already cataloged; nothing was inserted.
  Duplicate(ConflictReport),
  /// The input was a directory, imported file by file.
  Imported(ImportSummary),
}

/// Names the existing record an ingestion collided with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictReport {
  /// Title of the record already in the catalog.
  pub title:  String,
  /// Name of the folder that record is filed under.
  pub folder: String,
}

/// Outcome of a bulk directory import.
#[derive(Debug, Default)]
pub struct ImportSummary {
  /// Documents inserted by this run.
  pub added:   Vec<Document>,
  /// Files skipped because they were already cataloged.
  pub skipped: usize,
}

/// The ingestion orchestrator.
///
/// Owns the managed storage root and a shared HTTP client with a bounded
/// timeout. Handlers borrow both; the catalog is passed per call so one
/// ingestor can serve any store.
pub struct Ingestor {
  storage: PathBuf,
  client:  reqwest::Client,
}

impl Ingestor {
  /// Creates an ingestor writing retrieved content under `storage`.
  ///
  /// The directory is created if missing.
  pub fn new(storage: impl Into<PathBuf>) -> Result<Self> {
    let storage = storage.into();
    std::fs::create_dir_all(&storage)?;
    let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
    Ok(Self { storage, client })
  }

  /// The managed storage root locally retrieved documents are written to.
  pub fn storage_path(&self) -> &Path { &self.storage }

  /// Ingests a URL or path into the target folder.
  ///
  /// Directory inputs are delegated to [`Ingestor::import_directory`] and
  /// come back as [`IngestOutcome::Imported`]; the target folder is ignored
  /// for those, since bulk import files everything under a folder named
  /// after the directory.
  ///
  /// # Errors
  ///
  /// Validation failures are rejected before any network or storage side
  /// effect; fetch, scrape, and unsupported-content failures surface as
  /// their respective [`ShelfError`] variants. A uniqueness collision is not
  /// an error; it is [`IngestOutcome::Duplicate`].
  pub async fn ingest(
    &self,
    catalog: &mut Catalog,
    input: &str,
    folder_id: i64,
  ) -> Result<IngestOutcome> {
    let record = match classify(input)? {
      SourceKind::LocalDirectory(dir) =>
        return Ok(IngestOutcome::Imported(self.import_directory(catalog, &dir)?)),
      SourceKind::LocalFile(path) => local::file_record(&path)?,
      SourceKind::ArxivPaper(id) => arxiv::fetch(self, &id).await?,
      SourceKind::KnownArticleHost(url) => article::record(&url)?,
      SourceKind::GenericDocument(url) => web::fetch(self, url).await?,
    };
    self.finish(catalog, &record, folder_id)
  }

  /// Bulk-imports a directory tree of documents.
  ///
  /// A folder named after the directory is created (or resolved) at the top
  /// level, and every document-extension file in the tree is run through the
  /// dedup-and-insert step independently. Already-cataloged files are
  /// counted and skipped, which makes a repeated import idempotent.
  pub fn import_directory(&self, catalog: &mut Catalog, dir: &Path) -> Result<ImportSummary> {
    let name = dir
      .file_name()
      .and_then(|n| n.to_str())
      .ok_or_else(|| ShelfError::Validation(format!("Unusable directory name: {}", dir.display())))?;
    let folder_id = match catalog.resolve_folder_id(name)? {
      Some(id) => id,
      None => catalog.insert_folder(name, None)?.id,
    };

    let mut summary = ImportSummary::default();
    for path in local::document_files(dir) {
      let record = local::file_record(&path)?;
      match self.finish(catalog, &record, folder_id)? {
        IngestOutcome::Added(doc) => summary.added.push(doc),
        IngestOutcome::Duplicate(_) => summary.skipped += 1,
        IngestOutcome::Imported(_) => unreachable!("directory walk yields files only"),
      }
    }
    debug!(
      "Imported {} into \"{name}\": {} added, {} skipped",
      dir.display(),
      summary.added.len(),
      summary.skipped
    );
    Ok(summary)
  }

  /// The dedup-and-insert step shared by every handler.
  ///
  /// The pre-insert check and the insert both run on the caller's thread of
  /// control, so two candidates with the same derived title cannot
  /// interleave between check and insert; the catalog's uniqueness
  /// constraints remain the last line of defense, and a constraint hit on
  /// insert is reported as the same duplicate outcome as the pre-check.
  fn finish(
    &self,
    catalog: &mut Catalog,
    record: &NewDocument,
    folder_id: i64,
  ) -> Result<IngestOutcome> {
    if let Some(existing) = self.existing_record(catalog, record)? {
      return Ok(IngestOutcome::Duplicate(self.report(catalog, &existing)?));
    }
    match catalog.insert_document(record, folder_id) {
      Ok(doc) => Ok(IngestOutcome::Added(doc)),
      Err(ShelfError::Conflict(value)) => {
        // Lost the race against the constraint; treat as a normal conflict.
        warn!("Insert conflicted after pre-check passed for \"{value}\"");
        match self.existing_record(catalog, record)? {
          Some(existing) => Ok(IngestOutcome::Duplicate(self.report(catalog, &existing)?)),
          None => Err(ShelfError::Conflict(value)),
        }
      },
      Err(e) => Err(e),
    }
  }

  /// Looks up a record that would collide with `record`.
  fn existing_record(
    &self,
    catalog: &Catalog,
    record: &NewDocument,
  ) -> Result<Option<Document>> {
    if let Some(existing) = catalog.find_by_content_location(&record.content_location)? {
      return Ok(Some(existing));
    }
    catalog.find_by_title(record.title.trim())
  }

  /// Builds the conflict report naming the existing record and its folder.
  fn report(&self, catalog: &Catalog, existing: &Document) -> Result<ConflictReport> {
    Ok(ConflictReport {
      title:  existing.title.clone(),
      folder: catalog.folder_name(existing.folder_id)?,
    })
  }

  /// Shared HTTP client used by the network handlers.
  pub(crate) fn client(&self) -> &reqwest::Client { &self.client }
}

/// Maps a transport error to the fetch taxonomy.
///
/// Timeouts carry the URL as context; everything else stays a transparent
/// network error.
pub(crate) fn fetch_error(url: &str, e: reqwest::Error) -> ShelfError {
  if e.is_timeout() {
    ShelfError::Fetch(format!("{url} timed out"))
  } else {
    ShelfError::Network(e)
  }
}
