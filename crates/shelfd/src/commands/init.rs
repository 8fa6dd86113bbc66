//! Module for the `init` command: explicit catalog and storage setup.

use super::*;

/// Function for the [`Commands::Init`] in the CLI.
///
/// Opening the catalog creates it (and seeds the default folder) when
/// missing; this command exists so that setup is an explicit, visible step
/// and the chosen paths are echoed back.
pub fn init(catalog_path: &Path, storage_path: &Path) -> Result<()> {
  let _catalog = Catalog::open(catalog_path)?;
  std::fs::create_dir_all(storage_path)?;

  println!(
    "{} Catalog initialized successfully at {}",
    style(SUCCESS_PREFIX).green(),
    style(catalog_path.display()).cyan()
  );
  println!(
    "{} Documents will be stored under {}",
    style(INFO_PREFIX).blue(),
    style(storage_path.display()).cyan()
  );
  println!(
    "{} Default folder: {}",
    style(INFO_PREFIX).blue(),
    style(shelf::catalog::DEFAULT_FOLDER_NAME).cyan()
  );
  Ok(())
}
