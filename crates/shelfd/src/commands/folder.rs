//! Module for the `folder` subcommands: tree management.

use super::*;

/// Dispatcher for [`Commands::Folder`].
pub fn folder(catalog: &mut Catalog, command: FolderCommands) -> Result<()> {
  match command {
    FolderCommands::List => list(catalog),
    FolderCommands::New { name, parent } => new(catalog, &name, parent.as_deref()),
    FolderCommands::Rename { name, new_name } => rename(catalog, &name, &new_name),
    FolderCommands::Rm { name, recursive, force } => rm(catalog, &name, recursive, force),
  }
}

/// Prints the folder tree, children indented under their parents.
fn list(catalog: &Catalog) -> Result<()> {
  let folders = catalog.list_folders()?;
  for folder in &folders {
    let depth = ancestry_depth(&folders, folder);
    println!(
      "{}{} {}",
      CONTINUE_PREFIX.repeat(depth),
      style(TREE_BRANCH).dim(),
      style(&folder.name).cyan()
    );
  }
  Ok(())
}

/// Number of ancestors above a folder, for display indentation.
fn ancestry_depth(folders: &[shelf::document::Folder], folder: &shelf::document::Folder) -> usize {
  let mut depth = 0;
  let mut parent = folder.parent_id;
  while let Some(id) = parent {
    depth += 1;
    parent = folders.iter().find(|f| f.id == id).and_then(|f| f.parent_id);
  }
  depth
}

fn new(catalog: &mut Catalog, name: &str, parent: Option<&str>) -> Result<()> {
  let parent_id = match parent {
    None => None,
    Some(parent) => Some(
      catalog
        .resolve_folder_id(parent)?
        .ok_or_else(|| ShelfError::FolderNotFound(parent.to_string()))?,
    ),
  };
  let folder = catalog.insert_folder(name, parent_id)?;
  println!("{} Created folder {}", style(SUCCESS_PREFIX).green(), style(&folder.name).cyan());
  Ok(())
}

fn rename(catalog: &mut Catalog, name: &str, new_name: &str) -> Result<()> {
  let id = catalog
    .resolve_folder_id(name)?
    .ok_or_else(|| ShelfError::FolderNotFound(name.to_string()))?;
  catalog.rename_folder(id, new_name)?;
  println!(
    "{} Renamed folder {} to {}",
    style(SUCCESS_PREFIX).green(),
    style(name).cyan(),
    style(new_name).cyan()
  );
  Ok(())
}

fn rm(catalog: &mut Catalog, name: &str, recursive: bool, force: bool) -> Result<()> {
  let id = catalog
    .resolve_folder_id(name)?
    .ok_or_else(|| ShelfError::FolderNotFound(name.to_string()))?;

  let policy =
    if recursive { DeletePolicy::Recursive } else { DeletePolicy::ReparentToDefault };
  if !force {
    let prompt = match policy {
      DeletePolicy::Recursive =>
        format!("Delete folder \"{name}\" and every document inside it?"),
      DeletePolicy::ReparentToDefault => format!(
        "Delete folder \"{name}\"? Its documents move to \"{}\"",
        shelf::catalog::DEFAULT_FOLDER_NAME
      ),
    };
    let confirmed = dialoguer::Confirm::new().with_prompt(prompt).default(false).interact()?;
    if !confirmed {
      println!("{} Aborted", style(INFO_PREFIX).blue());
      return Ok(());
    }
  }

  catalog.delete_folder(id, policy)?;
  println!("{} Deleted folder {}", style(SUCCESS_PREFIX).green(), style(name).cyan());
  Ok(())
}
