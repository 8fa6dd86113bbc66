//! Module for the `add` command: the full ingestion pipeline.

use super::*;

/// Function for the [`Commands::Add`] in the CLI.
pub async fn add(
  catalog: &mut Catalog,
  ingestor: &Ingestor,
  input: &str,
  folder: Option<&str>,
) -> Result<()> {
  let folder_id = resolve_target_folder(catalog, folder)?;

  println!("{} Ingesting {}", style(INFO_PREFIX).blue(), style(input).cyan());
  match ingestor.ingest(catalog, input, folder_id).await? {
    IngestOutcome::Added(doc) => {
      println!(
        "{} Added \"{}\" to {} (id {})",
        style(SUCCESS_PREFIX).green(),
        style(&doc.title).cyan(),
        style(catalog.folder_name(doc.folder_id)?).cyan(),
        doc.external_id
      );
    },
    IngestOutcome::Duplicate(report) => {
      println!(
        "{} \"{}\" already exists in folder {}",
        style(WARNING_PREFIX).yellow(),
        style(&report.title).cyan(),
        style(&report.folder).cyan()
      );
    },
    IngestOutcome::Imported(summary) => {
      println!(
        "{} Imported {} document(s), skipped {} already cataloged",
        style(SUCCESS_PREFIX).green(),
        summary.added.len(),
        summary.skipped
      );
    },
  }
  Ok(())
}
