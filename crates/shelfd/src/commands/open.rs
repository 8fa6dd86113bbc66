//! Module for the `open` command: resolve a viewer location and track
//! recency.

use super::*;

/// Function for the [`Commands::Open`] in the CLI.
///
/// Prints the document's content location for the viewer to load and stamps
/// it as the most recently viewed. With no id, resolves the last-viewed
/// document instead, the same read the viewer uses for session restore.
pub fn open(catalog: &mut Catalog, external_id: Option<&str>) -> Result<()> {
  let document = match external_id {
    Some(id) => require_document(catalog, id)?,
    None => match catalog.most_recent()? {
      Some(doc) => doc,
      None => {
        println!("{} The catalog is empty", style(INFO_PREFIX).blue());
        return Ok(());
      },
    },
  };

  catalog.touch_viewed(document.id)?;
  println!(
    "{} {} {}",
    style(SUCCESS_PREFIX).green(),
    style(&document.title).cyan(),
    style(format!("({})", document.external_id)).dim()
  );
  println!("{}", document.content_location);
  Ok(())
}
