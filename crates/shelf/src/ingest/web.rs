//! Generic remote-document ingestion.
//!
//! Unrecognized URLs are fetched and inspected by content type: a document
//! format is streamed into the managed storage root, anything else is
//! rejected without writing a file. Requests carry a realistic browser-like
//! header set; several hosts serve PDFs to browsers but refuse bare
//! library user agents.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, USER_AGENT};
use url::Url;
use uuid::Uuid;

use super::*;
use crate::storage;

/// Content types accepted as importable documents.
const DOCUMENT_CONTENT_TYPES: &[&str] = &["application/pdf"];

/// Browser-like headers sent with every generic fetch.
fn browser_headers() -> HeaderMap {
  let mut headers = HeaderMap::new();
  headers.insert(
    USER_AGENT,
    HeaderValue::from_static(
      "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
       (KHTML, like Gecko) Version/17.6 Safari/605.1.15",
    ),
  );
  headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
  headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
  headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
  headers
}

/// Fetches a URL and imports it when the response is a document.
///
/// # Errors
///
/// - [`ShelfError::Fetch`] on non-2xx responses or timeout.
/// - [`ShelfError::UnsupportedContent`] when the content type is not a
///   document format; no file is written in that case.
pub(crate) async fn fetch(ingestor: &Ingestor, url: Url) -> Result<NewDocument> {
  let response = ingestor
    .client()
    .get(url.clone())
    .headers(browser_headers())
    .send()
    .await
    .map_err(|e| fetch_error(url.as_str(), e))?;
  if !response.status().is_success() {
    return Err(ShelfError::Fetch(format!("{url} returned {}", response.status())));
  }

  let content_type = response
    .headers()
    .get(reqwest::header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .unwrap_or("")
    .to_ascii_lowercase();
  if !DOCUMENT_CONTENT_TYPES.iter().any(|t| content_type.contains(t)) {
    return Err(ShelfError::UnsupportedContent(content_type));
  }

  let external_id = Uuid::new_v4().to_string();
  let title = title_for(&url, &external_id);
  // Stored as `<external_id>.pdf`: distinct documents whose URLs end in the
  // same segment must never share a storage path.
  let dest = ingestor.storage_path().join(format!("{external_id}.pdf"));
  storage::download_to(response, &dest).await?;

  Ok(NewDocument {
    external_id,
    title,
    authors: None,
    abstract_text: None,
    content_location: dest.to_string_lossy().into_owned(),
    source_url: Some(url.to_string()),
  })
}

/// Derives a title from the URL's last path segment.
///
/// A trailing `.pdf` is dropped; the generated external id stands in when
/// the URL carries no usable name.
fn title_for(url: &Url, external_id: &str) -> String {
  let segment = url
    .path_segments()
    .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
    .unwrap_or(external_id);
  if segment.to_ascii_lowercase().ends_with(".pdf") {
    segment[.. segment.len() - ".pdf".len()].to_string()
  } else {
    segment.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_title_drops_pdf_extension() {
    let url = Url::parse("https://example.com/papers/report.pdf").unwrap();
    assert_eq!(title_for(&url, "unused"), "report");
  }

  #[test]
  fn test_title_keeps_bare_segment() {
    let url = Url::parse("https://example.com/papers/report").unwrap();
    assert_eq!(title_for(&url, "unused"), "report");
  }

  #[test]
  fn test_title_falls_back_to_external_id() {
    let url = Url::parse("https://example.com/").unwrap();
    assert_eq!(title_for(&url, "abc-123"), "abc-123");
  }

  #[test]
  fn test_same_segment_never_shares_a_storage_name() {
    // Distinct documents whose URLs end identically must get distinct
    // storage paths, keyed on the generated external id.
    let urls = [
      Url::parse("https://example.com/a/report.pdf").unwrap(),
      Url::parse("https://example.com/b/report.pdf").unwrap(),
    ];
    let names: Vec<String> = urls
      .iter()
      .map(|url| {
        let external_id = Uuid::new_v4().to_string();
        assert_eq!(title_for(url, &external_id), "report");
        format!("{external_id}.pdf")
      })
      .collect();
    assert_ne!(names[0], names[1]);
  }

  #[test]
  fn test_browser_headers_present() {
    let headers = browser_headers();
    assert!(headers.get(USER_AGENT).unwrap().to_str().unwrap().starts_with("Mozilla/5.0"));
    assert!(headers.contains_key(ACCEPT_LANGUAGE));
  }
}
