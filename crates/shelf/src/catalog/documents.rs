//! Document read/write primitives and recency tracking.

use super::*;

impl Catalog {
  /// Inserts a new document into the catalog.
  ///
  /// Stamps `added_at` with the current time and files the document under
  /// `folder_id`.
  ///
  /// # Errors
  ///
  /// - [`ShelfError::Validation`] if the title is empty or `folder_id` does
  ///   not reference an existing folder; nothing is written.
  /// - [`ShelfError::Conflict`] if the title, content location, or external
  ///   id already exists. The existing row is unchanged.
  pub fn insert_document(&mut self, record: &NewDocument, folder_id: i64) -> Result<Document> {
    let title = record.title.trim();
    if title.is_empty() {
      return Err(ShelfError::Validation("Title cannot be empty".into()));
    }
    if !self.folder_exists(folder_id)? {
      return Err(ShelfError::Validation(format!("No folder with id {folder_id}")));
    }

    let added_at = Utc::now();
    let inserted = self.conn.prepare_cached(
      "INSERT INTO documents (external_id, title, authors, abstract,
                              content_location, source_url, added_at, folder_id)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
       RETURNING id",
    )?.query_row(
      params![
        record.external_id,
        title,
        record.authors,
        record.abstract_text,
        record.content_location,
        record.source_url,
        added_at,
        folder_id,
      ],
      |row| row.get::<_, i64>(0),
    );

    match inserted {
      Ok(id) => Ok(Document {
        id,
        external_id: record.external_id.clone(),
        title: title.to_string(),
        authors: record.authors.clone(),
        abstract_text: record.abstract_text.clone(),
        content_location: record.content_location.clone(),
        source_url: record.source_url.clone(),
        added_at,
        last_viewed_at: None,
        folder_id,
      }),
      Err(e) if ShelfError::is_unique_violation(&e) => Err(self.conflict_for(record, title)),
      Err(e) => Err(e.into()),
    }
  }

  /// Names the value that collided when an insert hit a uniqueness
  /// constraint.
  fn conflict_for(&self, record: &NewDocument, title: &str) -> ShelfError {
    let colliding = match self.find_by_title(title) {
      Ok(Some(_)) => title.to_string(),
      _ => match self.find_by_content_location(&record.content_location) {
        Ok(Some(_)) => record.content_location.clone(),
        _ => record.external_id.clone(),
      },
    };
    ShelfError::Conflict(colliding)
  }

  /// Exact-match lookup by title, used for pre-insert conflict checks.
  pub fn find_by_title(&self, title: &str) -> Result<Option<Document>> {
    self.find_one("title", title)
  }

  /// Exact-match lookup by content location, used for "already imported"
  /// detection during bulk import.
  pub fn find_by_content_location(&self, location: &str) -> Result<Option<Document>> {
    self.find_one("content_location", location)
  }

  /// Exact-match lookup by external id.
  pub fn find_by_external_id(&self, external_id: &str) -> Result<Option<Document>> {
    self.find_one("external_id", external_id)
  }

  /// Single-row lookup on one of the unique document columns.
  fn find_one(&self, column: &str, value: &str) -> Result<Option<Document>> {
    let sql = format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE {column} = ?1");
    Ok(
      self
        .conn
        .prepare_cached(&sql)?
        .query_row(params![value], Document::from_row)
        .optional()?,
    )
  }

  /// Case-insensitive substring search on titles.
  ///
  /// Results are ordered by `last_viewed_at` descending with never-viewed
  /// documents last, then `added_at` descending. An empty substring returns
  /// every document, in the same order as [`Catalog::list_all`].
  pub fn search(&self, substring: &str) -> Result<Vec<Document>> {
    let mut stmt = self.conn.prepare_cached(&format!(
      "SELECT {DOCUMENT_COLUMNS} FROM documents
       WHERE title LIKE '%' || ?1 || '%'
       ORDER BY last_viewed_at DESC NULLS LAST, added_at DESC, id DESC"
    ))?;
    let documents =
      stmt.query_map(params![substring], Document::from_row)?.collect::<rusqlite::Result<_>>()?;
    Ok(documents)
  }

  /// Returns every document, most recently viewed first.
  pub fn list_all(&self) -> Result<Vec<Document>> { self.search("") }

  /// Moves a document to another folder.
  ///
  /// # Errors
  ///
  /// [`ShelfError::Validation`] if the target folder does not exist,
  /// [`ShelfError::DocumentNotFound`] if the document does not.
  pub fn update_folder(&mut self, document_id: i64, folder_id: i64) -> Result<()> {
    if !self.folder_exists(folder_id)? {
      return Err(ShelfError::Validation(format!("No folder with id {folder_id}")));
    }
    let changed = self
      .conn
      .prepare_cached("UPDATE documents SET folder_id = ?1 WHERE id = ?2")?
      .execute(params![folder_id, document_id])?;
    if changed == 0 {
      return Err(ShelfError::DocumentNotFound(document_id.to_string()));
    }
    Ok(())
  }

  /// Renames a document, re-checking the title uniqueness invariant.
  ///
  /// # Errors
  ///
  /// [`ShelfError::Conflict`] when another document already carries the new
  /// title; the row is unchanged.
  pub fn update_title(&mut self, document_id: i64, title: &str) -> Result<()> {
    let title = title.trim();
    if title.is_empty() {
      return Err(ShelfError::Validation("Title cannot be empty".into()));
    }
    let changed = self
      .conn
      .prepare_cached("UPDATE documents SET title = ?1 WHERE id = ?2")?
      .execute(params![title, document_id])
      .map_err(|e| {
        if ShelfError::is_unique_violation(&e) {
          ShelfError::Conflict(title.to_string())
        } else {
          e.into()
        }
      })?;
    if changed == 0 {
      return Err(ShelfError::DocumentNotFound(document_id.to_string()));
    }
    Ok(())
  }

  /// Records the current time as the document's last-viewed timestamp.
  pub fn touch_viewed(&mut self, document_id: i64) -> Result<()> {
    let changed = self
      .conn
      .prepare_cached("UPDATE documents SET last_viewed_at = ?1 WHERE id = ?2")?
      .execute(params![Utc::now(), document_id])?;
    if changed == 0 {
      return Err(ShelfError::DocumentNotFound(document_id.to_string()));
    }
    Ok(())
  }

  /// The most recently viewed document, used to restore the last session.
  ///
  /// Ties and never-viewed documents fall back to `added_at` descending;
  /// `None` only when the catalog is empty.
  pub fn most_recent(&self) -> Result<Option<Document>> {
    Ok(
      self
        .conn
        .prepare_cached(&format!(
          "SELECT {DOCUMENT_COLUMNS} FROM documents
           ORDER BY last_viewed_at DESC NULLS LAST, added_at DESC, id DESC
           LIMIT 1"
        ))?
        .query_row([], Document::from_row)
        .optional()?,
    )
  }

  /// Hard-deletes a document.
  pub fn delete_document(&mut self, document_id: i64) -> Result<()> {
    let changed = self
      .conn
      .prepare_cached("DELETE FROM documents WHERE id = ?1")?
      .execute(params![document_id])?;
    if changed == 0 {
      return Err(ShelfError::DocumentNotFound(document_id.to_string()));
    }
    Ok(())
  }
}
