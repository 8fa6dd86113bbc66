//! Modules for the `mv` and `retitle` commands: point mutations on a
//! cataloged document.

use super::*;

/// Function for the [`Commands::Mv`] in the CLI.
pub fn mv(catalog: &mut Catalog, external_id: &str, folder: &str) -> Result<()> {
  let document = require_document(catalog, external_id)?;
  let folder_id = resolve_target_folder(catalog, Some(folder))?;

  catalog.update_folder(document.id, folder_id)?;
  println!(
    "{} Moved \"{}\" to {}",
    style(SUCCESS_PREFIX).green(),
    style(&document.title).cyan(),
    style(folder).cyan()
  );
  Ok(())
}

/// Function for the [`Commands::Retitle`] in the CLI.
pub fn retitle(catalog: &mut Catalog, external_id: &str, title: &str) -> Result<()> {
  let document = require_document(catalog, external_id)?;

  catalog.update_title(document.id, title)?;
  println!(
    "{} Renamed \"{}\" to \"{}\"",
    style(SUCCESS_PREFIX).green(),
    style(&document.title).cyan(),
    style(title).cyan()
  );
  Ok(())
}
