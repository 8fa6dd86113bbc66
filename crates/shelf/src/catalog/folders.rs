//! Folder tree operations: create, rename, delete-with-policy, list,
//! resolve.
//!
//! The folder graph is a forest. Folders are only ever created as children of
//! existing folders (or at the root) and there is no reparent operation, so
//! `parent_id` chains can never form a cycle.

use super::*;

/// What happens to a deleted folder's contents.
///
/// The source of truth for this catalog is non-destructive by default:
/// documents anywhere in the deleted subtree are reparented to the default
/// folder. Recursive deletion is an explicit opt-in, never inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
  /// Move every document in the subtree to the default folder, then delete
  /// the folders.
  #[default]
  ReparentToDefault,
  /// Delete every document and folder in the subtree.
  Recursive,
}

impl Catalog {
  /// Creates a folder under `parent_id`, or at the root when `None`.
  ///
  /// # Errors
  ///
  /// - [`ShelfError::Validation`] for an empty name or missing parent.
  /// - [`ShelfError::Conflict`] when a sibling already carries the name.
  pub fn insert_folder(&mut self, name: &str, parent_id: Option<i64>) -> Result<Folder> {
    let name = name.trim();
    if name.is_empty() {
      return Err(ShelfError::Validation("Folder name cannot be empty".into()));
    }
    if let Some(parent) = parent_id {
      if !self.folder_exists(parent)? {
        return Err(ShelfError::Validation(format!("No folder with id {parent}")));
      }
    }

    let inserted = self
      .conn
      .prepare_cached("INSERT INTO folders (name, parent_id) VALUES (?1, ?2) RETURNING id")?
      .query_row(params![name, parent_id], |row| row.get::<_, i64>(0));

    match inserted {
      Ok(id) => Ok(Folder { id, name: name.to_string(), parent_id }),
      Err(e) if ShelfError::is_unique_violation(&e) =>
        Err(ShelfError::Conflict(name.to_string())),
      Err(e) => Err(e.into()),
    }
  }

  /// Lists every folder, parents before children, siblings by name.
  pub fn list_folders(&self) -> Result<Vec<Folder>> {
    let mut stmt = self.conn.prepare_cached(
      "SELECT id, name, parent_id FROM folders ORDER BY parent_id IS NOT NULL, parent_id, name",
    )?;
    let folders = stmt.query_map([], Folder::from_row)?.collect::<rusqlite::Result<_>>()?;
    Ok(folders)
  }

  /// Resolves a folder name to its id.
  ///
  /// Names are only unique among siblings; when several folders share the
  /// name, the earliest-created one wins.
  pub fn resolve_folder_id(&self, name: &str) -> Result<Option<i64>> {
    Ok(
      self
        .conn
        .prepare_cached("SELECT id FROM folders WHERE name = ?1 ORDER BY id LIMIT 1")?
        .query_row(params![name], |row| row.get(0))
        .optional()?,
    )
  }

  /// Returns the name of the folder with the given id.
  pub fn folder_name(&self, id: i64) -> Result<String> {
    self
      .conn
      .prepare_cached("SELECT name FROM folders WHERE id = ?1")?
      .query_row(params![id], |row| row.get(0))
      .optional()?
      .ok_or_else(|| ShelfError::FolderNotFound(id.to_string()))
  }

  /// Renames a folder.
  ///
  /// # Errors
  ///
  /// - [`ShelfError::Validation`] for an empty name or an attempt to rename
  ///   the default folder.
  /// - [`ShelfError::Conflict`] when a sibling already carries the name.
  pub fn rename_folder(&mut self, id: i64, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
      return Err(ShelfError::Validation("Folder name cannot be empty".into()));
    }
    if id == self.default_folder {
      return Err(ShelfError::Validation(format!(
        "The \"{DEFAULT_FOLDER_NAME}\" folder cannot be renamed"
      )));
    }
    let changed = self
      .conn
      .prepare_cached("UPDATE folders SET name = ?1 WHERE id = ?2")?
      .execute(params![name, id])
      .map_err(|e| {
        if ShelfError::is_unique_violation(&e) {
          ShelfError::Conflict(name.to_string())
        } else {
          e.into()
        }
      })?;
    if changed == 0 {
      return Err(ShelfError::FolderNotFound(id.to_string()));
    }
    Ok(())
  }

  /// Deletes a folder and its descendant folders in one atomic transaction.
  ///
  /// Documents anywhere in the subtree are handled per `policy`: reparented
  /// to the default folder, or deleted along with the folders. Either way no
  /// document can end up referencing a folder that no longer exists.
  ///
  /// # Errors
  ///
  /// [`ShelfError::Validation`] when `id` is the default folder, which must
  /// always exist.
  pub fn delete_folder(&mut self, id: i64, policy: DeletePolicy) -> Result<()> {
    if id == self.default_folder {
      return Err(ShelfError::Validation(format!(
        "The \"{DEFAULT_FOLDER_NAME}\" folder cannot be deleted"
      )));
    }
    let default_folder = self.default_folder;

    let tx = self.conn.transaction()?;
    let subtree = {
      let mut stmt = tx.prepare_cached(
        "WITH RECURSIVE subtree(id) AS (
           SELECT id FROM folders WHERE id = ?1
           UNION ALL
           SELECT f.id FROM folders f JOIN subtree s ON f.parent_id = s.id
         )
         SELECT id FROM subtree",
      )?;
      let ids = stmt
        .query_map(params![id], |row| row.get::<_, i64>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
      ids
    };
    if subtree.is_empty() {
      return Err(ShelfError::FolderNotFound(id.to_string()));
    }

    // Ids come straight from the subtree query, safe to embed.
    let ids = subtree.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",");
    match policy {
      DeletePolicy::ReparentToDefault => {
        tx.execute(
          &format!("UPDATE documents SET folder_id = ?1 WHERE folder_id IN ({ids})"),
          params![default_folder],
        )?;
      },
      DeletePolicy::Recursive => {
        tx.execute(&format!("DELETE FROM documents WHERE folder_id IN ({ids})"), [])?;
      },
    }
    // Descendant folders go with the root via the cascading self-reference.
    tx.execute("DELETE FROM folders WHERE id = ?1", params![id])?;
    tx.commit()?;
    debug!("Deleted folder {id} and {} descendant(s) with {policy:?}", subtree.len() - 1);
    Ok(())
  }

  /// Whether a folder with the given id exists.
  pub(super) fn folder_exists(&self, id: i64) -> Result<bool> {
    Ok(
      self
        .conn
        .prepare_cached("SELECT 1 FROM folders WHERE id = ?1")?
        .query_row(params![id], |_| Ok(()))
        .optional()?
        .is_some(),
    )
  }
}
