//! Module for the `search` command.

use super::*;

/// Function for the [`Commands::Search`] in the CLI.
///
/// An omitted query lists the whole catalog in the same order.
pub fn search(catalog: &Catalog, query: Option<&str>) -> Result<()> {
  let documents = catalog.search(query.unwrap_or(""))?;
  if documents.is_empty() {
    println!("{} No documents found", style(INFO_PREFIX).blue());
    return Ok(());
  }

  println!("{} Found {} document(s)", style(INFO_PREFIX).blue(), documents.len());
  for doc in &documents {
    let folder = catalog.folder_name(doc.folder_id)?;
    println!(
      "{} {} {}",
      style(TREE_BRANCH).dim(),
      style(&doc.title).cyan(),
      style(format!("[{folder}] ({})", doc.external_id)).dim()
    );
    if let Some(authors) = &doc.authors {
      println!("{}   {}", style(TREE_VERT).dim(), style(authors).dim());
    }
  }
  Ok(())
}
