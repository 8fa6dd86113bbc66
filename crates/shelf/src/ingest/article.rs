//! Known-article-host ingestion.
//!
//! Articles on the allow-listed platforms are cataloged by reference: no
//! content is fetched. The handler derives a human-readable title from the
//! URL's last path segment, generates a synthetic unique external id, and
//! stores the remote URL itself as the content location for the viewer to
//! load in place.

use url::Url;
use uuid::Uuid;

use super::*;

/// Builds a catalog record for an article URL without fetching it.
pub(crate) fn record(url: &Url) -> Result<NewDocument> {
  let title = title_from_url(url)?;
  let location = url.as_str().trim_end_matches('/').to_string();
  Ok(NewDocument {
    external_id:      Uuid::new_v4().to_string(),
    title,
    authors:          None,
    abstract_text:    None,
    content_location: location.clone(),
    source_url:       Some(location),
  })
}

/// Derives a title from the last path segment of an article URL.
///
/// Separators become spaces and each word is title-cased, so
/// `/how-to-write-parsers` reads as "How To Write Parsers".
fn title_from_url(url: &Url) -> Result<String> {
  let segment = url
    .path_segments()
    .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
    .ok_or_else(|| ShelfError::Validation(format!("No usable path in {url}")))?;

  let title = segment
    .split(['-', '_'])
    .filter(|word| !word.is_empty())
    .map(title_case)
    .collect::<Vec<_>>()
    .join(" ");
  if title.is_empty() {
    return Err(ShelfError::Validation(format!("No usable path in {url}")));
  }
  Ok(title)
}

/// Uppercases the first character of a word.
fn title_case(word: &str) -> String {
  let mut chars = word.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_title_from_slug() {
    let url = Url::parse("https://medium.com/@a/how-to-write-parsers-1a2b3c").unwrap();
    assert_eq!(title_from_url(&url).unwrap(), "How To Write Parsers 1a2b3c");
  }

  #[test]
  fn test_trailing_slash_ignored() {
    let url = Url::parse("https://towardsdatascience.com/attention-explained/").unwrap();
    assert_eq!(title_from_url(&url).unwrap(), "Attention Explained");
  }

  #[test]
  fn test_record_keeps_url_as_content_location() {
    let url = Url::parse("https://medium.com/@a/some-article/").unwrap();
    let record = record(&url).unwrap();
    assert_eq!(record.content_location, "https://medium.com/@a/some-article");
    assert_eq!(record.source_url.as_deref(), Some("https://medium.com/@a/some-article"));
    assert!(record.authors.is_none());
    assert!(record.abstract_text.is_none());
  }

  #[test]
  fn test_external_ids_are_unique() {
    let url = Url::parse("https://medium.com/@a/x-y").unwrap();
    let a = record(&url).unwrap();
    let b = record(&url).unwrap();
    assert_ne!(a.external_id, b.external_id);
  }

  #[test]
  fn test_bare_host_is_rejected() {
    let url = Url::parse("https://medium.com/").unwrap();
    assert!(matches!(title_from_url(&url), Err(ShelfError::Validation(_))));
  }
}
