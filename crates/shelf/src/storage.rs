//! The managed storage root for locally retrieved documents.
//!
//! Every remote source that caches content locally (arXiv PDFs, generic
//! document fetches) writes into a single storage directory with
//! collision-avoiding filenames of the form `<external_id>.<ext>`. Writes are
//! atomic with respect to abandonment: content is streamed to a temporary
//! sibling path and renamed into place only once the body is fully written,
//! so a cancelled or failed fetch never leaves a partial file in the root.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::Result;

/// Returns the default directory for locally retrieved documents.
///
/// The path is constructed as follows:
/// - On Unix: `~/Documents/shelf/documents`
/// - On macOS: `~/Documents/shelf/documents`
/// - On Windows: `Documents\shelf\documents`
/// - Fallback: `./documents` in the current directory
pub fn default_storage_path() -> PathBuf {
  dirs::document_dir().unwrap_or_else(|| PathBuf::from(".")).join("shelf").join("documents")
}

/// Streams a response body to `dest`, atomically.
///
/// The body is written chunk by chunk to `<dest>.part` and renamed to `dest`
/// only after the final chunk lands. On any failure the partial temporary
/// file is removed best-effort and `dest` is never created.
pub(crate) async fn download_to(mut response: reqwest::Response, dest: &Path) -> Result<()> {
  let tmp = part_path(dest);
  match write_body(&mut response, &tmp).await {
    Ok(()) => {
      tokio::fs::rename(&tmp, dest).await?;
      debug!("Wrote {}", dest.display());
      Ok(())
    },
    Err(e) => {
      if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
        warn!("Could not remove partial download {}: {cleanup}", tmp.display());
      }
      Err(e)
    },
  }
}

/// Writes the full response body to `path`.
async fn write_body(response: &mut reqwest::Response, path: &Path) -> Result<()> {
  let mut file = tokio::fs::File::create(path).await?;
  while let Some(chunk) = response.chunk().await? {
    file.write_all(&chunk).await?;
  }
  file.flush().await?;
  Ok(())
}

/// Temporary sibling path used while a download is in flight.
fn part_path(dest: &Path) -> PathBuf {
  let mut name = dest.file_name().map(|n| n.to_os_string()).unwrap_or_default();
  name.push(".part");
  dest.with_file_name(name)
}
