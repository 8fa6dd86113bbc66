//! CLI subcommands for the shelf document library.

use super::*;

pub mod add;
pub mod edit;
pub mod folder;
pub mod init;
pub mod open;
pub mod remove;
pub mod search;

pub use add::add;
pub use edit::{mv, retitle};
pub use folder::folder;
pub use init::init;
pub use open::open;
pub use remove::remove;
pub use search::search;

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Initialize the catalog and storage directories
  Init,

  /// Ingest a URL, file, or directory into the catalog
  Add {
    /// arXiv/article/document URL, local file, or local directory
    input: String,

    /// Target folder name (defaults to the "Unsorted" folder)
    #[arg(long, short)]
    folder: Option<String>,
  },

  /// Search document titles, or list everything
  Search {
    /// Case-insensitive title substring; omit to list all documents
    query: Option<String>,
  },

  /// Print a document's content location and mark it as viewed
  Open {
    /// External id of the document; omit for the most recently viewed
    external_id: Option<String>,
  },

  /// Remove a document from the catalog
  Remove {
    /// External id of the document
    external_id: String,

    /// Skip the confirmation prompt
    #[arg(long)]
    force: bool,
  },

  /// Move a document to another folder
  Mv {
    /// External id of the document
    external_id: String,

    /// Target folder name
    folder: String,
  },

  /// Rename a document
  Retitle {
    /// External id of the document
    external_id: String,

    /// New title
    title: String,
  },

  /// Manage the folder tree
  Folder {
    #[command(subcommand)]
    command: FolderCommands,
  },
}

/// Folder management subcommands
#[derive(Subcommand, Clone)]
pub enum FolderCommands {
  /// List every folder
  List,

  /// Create a folder
  New {
    /// Folder name, unique among its siblings
    name: String,

    /// Parent folder name; omit for a top-level folder
    #[arg(long)]
    parent: Option<String>,
  },

  /// Rename a folder
  Rename {
    /// Current folder name
    name: String,

    /// New name
    new_name: String,
  },

  /// Delete a folder; its documents move to the default folder unless
  /// --recursive is given
  Rm {
    /// Folder name
    name: String,

    /// Delete contained documents and subfolders instead of reparenting
    #[arg(long)]
    recursive: bool,

    /// Skip the confirmation prompt
    #[arg(long)]
    force: bool,
  },
}

/// Resolves a folder name to its id, or the default folder when absent.
pub fn resolve_target_folder(catalog: &Catalog, name: Option<&str>) -> Result<i64> {
  match name {
    None => Ok(catalog.default_folder_id()),
    Some(name) => catalog
      .resolve_folder_id(name)?
      .ok_or_else(|| ShelfError::FolderNotFound(name.to_string()).into()),
  }
}

/// Looks up a document by external id, with a CLI-friendly error.
pub fn require_document(catalog: &Catalog, external_id: &str) -> Result<shelf::document::Document> {
  catalog
    .find_by_external_id(external_id)?
    .ok_or_else(|| ShelfError::DocumentNotFound(external_id.to_string()).into())
}
