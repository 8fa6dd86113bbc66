//! Local file and directory ingestion.
//!
//! Local content is cataloged in place: the path itself becomes the content
//! location and nothing is copied into the storage root. Directory import is
//! an iteration contract: the walk yields one file-shaped candidate per
//! document-extension file found, and the orchestrator runs each through the
//! same dedup-and-insert step as any other source.

use walkdir::WalkDir;

use super::*;
use uuid::Uuid;

/// File extensions treated as importable documents during a directory walk.
pub(crate) const DOCUMENT_EXTENSIONS: &[&str] = &["pdf"];

/// Builds a catalog record for a local file.
///
/// The title defaults to the filename without its extension; the external id
/// is a generated unique token, since local files carry no natural one.
pub(crate) fn file_record(path: &Path) -> Result<NewDocument> {
  let title = path
    .file_stem()
    .and_then(|stem| stem.to_str())
    .filter(|stem| !stem.is_empty())
    .ok_or_else(|| ShelfError::Validation(format!("Unusable filename: {}", path.display())))?;

  Ok(NewDocument {
    external_id:      Uuid::new_v4().to_string(),
    title:            title.to_string(),
    authors:          None,
    abstract_text:    None,
    content_location: path.to_string_lossy().into_owned(),
    source_url:       None,
  })
}

/// Walks a directory tree, yielding document files in a stable order.
///
/// Unreadable entries are skipped rather than aborting the batch.
pub(crate) fn document_files(dir: &Path) -> impl Iterator<Item = PathBuf> {
  WalkDir::new(dir)
    .sort_by_file_name()
    .into_iter()
    .filter_map(|entry| match entry {
      Ok(entry) => Some(entry),
      Err(e) => {
        warn!("Skipping unreadable entry during import: {e}");
        None
      },
    })
    .filter(|entry| entry.file_type().is_file())
    .map(|entry| entry.into_path())
    .filter(|path| is_document(path))
}

/// Whether a path carries one of the [`DOCUMENT_EXTENSIONS`].
fn is_document(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .map(|ext| DOCUMENT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
    .unwrap_or(false)
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_file_record_title_is_stem() {
    let record = file_record(Path::new("/library/deep-learning-notes.pdf")).unwrap();
    assert_eq!(record.title, "deep-learning-notes");
    assert_eq!(record.content_location, "/library/deep-learning-notes.pdf");
    assert!(record.source_url.is_none());
  }

  #[test]
  fn test_document_files_filters_and_recurses() {
    let dir = tempdir().unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    std::fs::write(dir.path().join("a.pdf"), b"%PDF").unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"not a document").unwrap();
    std::fs::write(dir.path().join("nested/b.PDF"), b"%PDF").unwrap();

    let mut names: Vec<String> = document_files(dir.path())
      .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
      .collect();
    names.sort();
    assert_eq!(names, vec!["a.pdf", "b.PDF"]);
  }

  #[test]
  fn test_is_document() {
    assert!(is_document(Path::new("x.pdf")));
    assert!(is_document(Path::new("x.PDF")));
    assert!(!is_document(Path::new("x.epub.txt")));
    assert!(!is_document(Path::new("no_extension")));
  }
}
