use tempfile::tempdir;
use tracing_test::traced_test;

use super::*;

/// Helper to set up an ephemeral catalog.
fn setup() -> (Catalog, PathBuf, tempfile::TempDir) {
  let dir = tempdir().unwrap();
  let path = dir.path().join("test.db");
  let catalog = Catalog::open(&path).unwrap();
  (catalog, path, dir)
}

fn record(external_id: &str, title: &str, location: &str) -> NewDocument {
  NewDocument {
    external_id:      external_id.to_string(),
    title:            title.to_string(),
    authors:          None,
    abstract_text:    None,
    content_location: location.to_string(),
    source_url:       None,
  }
}

#[traced_test]
#[test]
fn test_open_creates_file_and_default_folder() {
  let (catalog, path, _dir) = setup();

  assert!(path.exists());
  let folders = catalog.list_folders().unwrap();
  assert_eq!(folders.len(), 1);
  assert_eq!(folders[0].name, DEFAULT_FOLDER_NAME);
  assert_eq!(folders[0].id, catalog.default_folder_id());
}

#[traced_test]
#[test]
fn test_reopen_backs_up_previous_catalog() {
  let (catalog, path, _dir) = setup();
  drop(catalog);

  let _catalog = Catalog::open(&path).unwrap();
  assert!(path.with_file_name("test.db.backup").exists());
}

#[traced_test]
#[test]
fn test_reopen_keeps_single_default_folder() {
  let (catalog, path, _dir) = setup();
  drop(catalog);

  let catalog = Catalog::open(&path).unwrap();
  assert_eq!(catalog.list_folders().unwrap().len(), 1);
}

#[test]
fn test_default_path() {
  let path = Catalog::default_path();
  assert!(path.ends_with("shelf/shelf.db") || path.ends_with("shelf\\shelf.db"));
}

#[traced_test]
#[test]
fn test_insert_and_find_document() {
  let (mut catalog, _path, _dir) = setup();

  let doc = catalog
    .insert_document(&record("2301.07041", "Verifiable FHE", "/store/2301.07041.pdf"), catalog.default_folder_id())
    .unwrap();
  assert_eq!(doc.external_id, "2301.07041");
  assert!(doc.last_viewed_at.is_none());

  let found = catalog.find_by_title("Verifiable FHE").unwrap().unwrap();
  assert_eq!(found.id, doc.id);
  assert_eq!(found.added_at, doc.added_at);
  assert!(catalog.find_by_title("No Such Title").unwrap().is_none());
  assert!(catalog.find_by_content_location("/store/2301.07041.pdf").unwrap().is_some());
  assert!(catalog.find_by_external_id("2301.07041").unwrap().is_some());
}

#[traced_test]
#[test]
fn test_insert_empty_title_is_validation_error() {
  let (mut catalog, _path, _dir) = setup();

  let result =
    catalog.insert_document(&record("x", "   ", "/store/x.pdf"), catalog.default_folder_id());
  assert!(matches!(result, Err(ShelfError::Validation(_))));
  assert!(catalog.list_all().unwrap().is_empty());
}

#[traced_test]
#[test]
fn test_insert_into_missing_folder_is_validation_error() {
  let (mut catalog, _path, _dir) = setup();

  let result = catalog.insert_document(&record("x", "Title", "/store/x.pdf"), 999);
  assert!(matches!(result, Err(ShelfError::Validation(_))));
}

#[traced_test]
#[test]
fn test_duplicate_content_location_is_conflict_and_original_unchanged() {
  let (mut catalog, _path, _dir) = setup();
  let default = catalog.default_folder_id();

  let original =
    catalog.insert_document(&record("a", "First Title", "/store/shared.pdf"), default).unwrap();
  let result = catalog.insert_document(&record("b", "Second Title", "/store/shared.pdf"), default);
  assert!(matches!(result, Err(ShelfError::Conflict(ref loc)) if loc == "/store/shared.pdf"));

  let kept = catalog.find_by_content_location("/store/shared.pdf").unwrap().unwrap();
  assert_eq!(kept.id, original.id);
  assert_eq!(kept.title, "First Title");
  assert_eq!(catalog.list_all().unwrap().len(), 1);
}

#[traced_test]
#[test]
fn test_duplicate_title_is_conflict() {
  let (mut catalog, _path, _dir) = setup();
  let default = catalog.default_folder_id();

  catalog.insert_document(&record("a", "Same Title", "/store/a.pdf"), default).unwrap();
  let result = catalog.insert_document(&record("b", "Same Title", "/store/b.pdf"), default);
  assert!(matches!(result, Err(ShelfError::Conflict(ref title)) if title == "Same Title"));
}

#[traced_test]
#[test]
fn test_search_is_case_insensitive_substring() {
  let (mut catalog, _path, _dir) = setup();
  let default = catalog.default_folder_id();

  catalog.insert_document(&record("a", "Attention Is All You Need", "/a.pdf"), default).unwrap();
  catalog.insert_document(&record("b", "Deep Residual Learning", "/b.pdf"), default).unwrap();

  let hits = catalog.search("attention").unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].title, "Attention Is All You Need");
  assert!(catalog.search("transformer").unwrap().is_empty());
}

#[traced_test]
#[test]
fn test_empty_search_matches_list_all_ordering() {
  let (mut catalog, _path, _dir) = setup();
  let default = catalog.default_folder_id();

  let a = catalog.insert_document(&record("a", "Alpha", "/a.pdf"), default).unwrap();
  let b = catalog.insert_document(&record("b", "Beta", "/b.pdf"), default).unwrap();
  let _c = catalog.insert_document(&record("c", "Gamma", "/c.pdf"), default).unwrap();
  catalog.touch_viewed(a.id).unwrap();
  catalog.touch_viewed(b.id).unwrap();

  let searched: Vec<i64> = catalog.search("").unwrap().iter().map(|d| d.id).collect();
  let listed: Vec<i64> = catalog.list_all().unwrap().iter().map(|d| d.id).collect();
  assert_eq!(searched, listed);
  // Viewed documents first (most recent view leading), never-viewed last.
  assert_eq!(listed[0], b.id);
  assert_eq!(listed[1], a.id);
}

#[traced_test]
#[test]
fn test_touch_then_most_recent() {
  let (mut catalog, _path, _dir) = setup();
  let default = catalog.default_folder_id();

  assert!(catalog.most_recent().unwrap().is_none());

  let a = catalog.insert_document(&record("a", "Alpha", "/a.pdf"), default).unwrap();
  let b = catalog.insert_document(&record("b", "Beta", "/b.pdf"), default).unwrap();

  catalog.touch_viewed(b.id).unwrap();
  catalog.touch_viewed(a.id).unwrap();
  assert_eq!(catalog.most_recent().unwrap().unwrap().id, a.id);

  let viewed = catalog.find_by_external_id("a").unwrap().unwrap();
  assert!(viewed.last_viewed_at.is_some());
}

#[traced_test]
#[test]
fn test_most_recent_falls_back_to_added_at() {
  let (mut catalog, _path, _dir) = setup();
  let default = catalog.default_folder_id();

  catalog.insert_document(&record("a", "Alpha", "/a.pdf"), default).unwrap();
  let b = catalog.insert_document(&record("b", "Beta", "/b.pdf"), default).unwrap();

  // Nothing viewed yet: the newest addition restores the session.
  assert_eq!(catalog.most_recent().unwrap().unwrap().id, b.id);
}

#[traced_test]
#[test]
fn test_update_title_rechecks_uniqueness() {
  let (mut catalog, _path, _dir) = setup();
  let default = catalog.default_folder_id();

  let a = catalog.insert_document(&record("a", "Alpha", "/a.pdf"), default).unwrap();
  catalog.insert_document(&record("b", "Beta", "/b.pdf"), default).unwrap();

  catalog.update_title(a.id, "Alpha Revised").unwrap();
  assert!(catalog.find_by_title("Alpha Revised").unwrap().is_some());

  let result = catalog.update_title(a.id, "Beta");
  assert!(matches!(result, Err(ShelfError::Conflict(_))));
  assert!(matches!(catalog.update_title(a.id, ""), Err(ShelfError::Validation(_))));
  assert!(matches!(
    catalog.update_title(999, "Anything"),
    Err(ShelfError::DocumentNotFound(_))
  ));
}

#[traced_test]
#[test]
fn test_update_folder_moves_document() {
  let (mut catalog, _path, _dir) = setup();
  let default = catalog.default_folder_id();

  let reading = catalog.insert_folder("Reading", None).unwrap();
  let doc = catalog.insert_document(&record("a", "Alpha", "/a.pdf"), default).unwrap();

  catalog.update_folder(doc.id, reading.id).unwrap();
  assert_eq!(catalog.find_by_external_id("a").unwrap().unwrap().folder_id, reading.id);

  assert!(matches!(catalog.update_folder(doc.id, 999), Err(ShelfError::Validation(_))));
}

#[traced_test]
#[test]
fn test_delete_document() {
  let (mut catalog, _path, _dir) = setup();
  let default = catalog.default_folder_id();

  let doc = catalog.insert_document(&record("a", "Alpha", "/a.pdf"), default).unwrap();
  catalog.delete_document(doc.id).unwrap();
  assert!(catalog.find_by_external_id("a").unwrap().is_none());
  assert!(matches!(catalog.delete_document(doc.id), Err(ShelfError::DocumentNotFound(_))));
}

#[traced_test]
#[test]
fn test_sibling_folder_names_conflict() {
  let (mut catalog, _path, _dir) = setup();

  let parent = catalog.insert_folder("Parent", None).unwrap();
  catalog.insert_folder("Child", Some(parent.id)).unwrap();
  let result = catalog.insert_folder("Child", Some(parent.id));
  assert!(matches!(result, Err(ShelfError::Conflict(ref name)) if name == "Child"));
}

#[traced_test]
#[test]
fn test_same_name_allowed_under_different_parents() {
  let (mut catalog, _path, _dir) = setup();

  let a = catalog.insert_folder("A", None).unwrap();
  let b = catalog.insert_folder("B", None).unwrap();
  catalog.insert_folder("Notes", Some(a.id)).unwrap();
  catalog.insert_folder("Notes", Some(b.id)).unwrap();

  // Root names still collide with each other.
  assert!(matches!(catalog.insert_folder("A", None), Err(ShelfError::Conflict(_))));
}

#[traced_test]
#[test]
fn test_resolve_folder_id() {
  let (mut catalog, _path, _dir) = setup();

  let reading = catalog.insert_folder("Reading", None).unwrap();
  assert_eq!(catalog.resolve_folder_id("Reading").unwrap(), Some(reading.id));
  assert_eq!(catalog.resolve_folder_id("Missing").unwrap(), None);
  assert_eq!(catalog.folder_name(reading.id).unwrap(), "Reading");
}

#[traced_test]
#[test]
fn test_rename_folder() {
  let (mut catalog, _path, _dir) = setup();

  let reading = catalog.insert_folder("Reading", None).unwrap();
  catalog.insert_folder("Archive", None).unwrap();

  catalog.rename_folder(reading.id, "To Read").unwrap();
  assert_eq!(catalog.folder_name(reading.id).unwrap(), "To Read");

  assert!(matches!(catalog.rename_folder(reading.id, "Archive"), Err(ShelfError::Conflict(_))));
  assert!(matches!(
    catalog.rename_folder(catalog.default_folder_id(), "Else"),
    Err(ShelfError::Validation(_))
  ));
}

#[traced_test]
#[test]
fn test_delete_folder_reparents_documents_to_default() {
  let (mut catalog, _path, _dir) = setup();
  let default = catalog.default_folder_id();

  let a = catalog.insert_folder("A", None).unwrap();
  let b = catalog.insert_folder("B", Some(a.id)).unwrap();
  let doc = catalog.insert_document(&record("x", "X", "/x.pdf"), b.id).unwrap();

  catalog.delete_folder(a.id, DeletePolicy::ReparentToDefault).unwrap();

  assert_eq!(catalog.find_by_external_id("x").unwrap().unwrap().folder_id, default);
  assert!(catalog.resolve_folder_id("A").unwrap().is_none());
  assert!(catalog.resolve_folder_id("B").unwrap().is_none());
  // Document id survives the move.
  assert_eq!(catalog.find_by_title("X").unwrap().unwrap().id, doc.id);
}

#[traced_test]
#[test]
fn test_delete_folder_recursive_removes_documents() {
  let (mut catalog, _path, _dir) = setup();

  let a = catalog.insert_folder("A", None).unwrap();
  let b = catalog.insert_folder("B", Some(a.id)).unwrap();
  catalog.insert_document(&record("x", "X", "/x.pdf"), a.id).unwrap();
  catalog.insert_document(&record("y", "Y", "/y.pdf"), b.id).unwrap();

  catalog.delete_folder(a.id, DeletePolicy::Recursive).unwrap();

  assert!(catalog.list_all().unwrap().is_empty());
  assert_eq!(catalog.list_folders().unwrap().len(), 1);
}

#[traced_test]
#[test]
fn test_default_folder_cannot_be_deleted() {
  let (mut catalog, _path, _dir) = setup();

  let result = catalog.delete_folder(catalog.default_folder_id(), DeletePolicy::default());
  assert!(matches!(result, Err(ShelfError::Validation(_))));
  assert_eq!(catalog.list_folders().unwrap().len(), 1);
}

#[traced_test]
#[test]
fn test_delete_missing_folder() {
  let (mut catalog, _path, _dir) = setup();

  let result = catalog.delete_folder(999, DeletePolicy::default());
  assert!(matches!(result, Err(ShelfError::FolderNotFound(_))));
}
