//! Module for the `remove` command.

use super::*;

/// Function for the [`Commands::Remove`] in the CLI.
///
/// Hard-deletes the catalog row after confirmation. The content itself is
/// left on disk; the catalog never owns file lifetimes beyond ingestion.
pub fn remove(catalog: &mut Catalog, external_id: &str, force: bool) -> Result<()> {
  let document = require_document(catalog, external_id)?;

  if !force {
    let confirmed = dialoguer::Confirm::new()
      .with_prompt(format!("Remove \"{}\" from the catalog?", document.title))
      .default(false)
      .interact()?;
    if !confirmed {
      println!("{} Aborted", style(INFO_PREFIX).blue());
      return Ok(());
    }
  }

  catalog.delete_document(document.id)?;
  println!("{} Removed \"{}\"", style(SUCCESS_PREFIX).green(), style(&document.title).cyan());
  Ok(())
}
