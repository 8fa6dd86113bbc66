//! arXiv ingestion: abstract-page scrape plus PDF retrieval.
//!
//! arXiv metadata comes from the human-facing abstract page, whose contract
//! is one container (`div#abs`) holding a title heading, an author list of
//! anchor elements, and a block-quoted abstract. Any structural change to
//! that page surfaces as a scrape error for the single ingestion, never a
//! crash. The PDF is downloaded into the managed storage root as
//! `<id>.pdf` before the catalog row is written.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::trace;

use super::*;
use crate::storage;

lazy_static! {
  /// New-style arXiv identifier, e.g. `2301.07041`.
  static ref ARXIV_ID: Regex = Regex::new(r"^\d{4}\.\d{4,5}$").unwrap();

  static ref ABS_CONTAINER: Selector = Selector::parse("div#abs").unwrap();
  static ref TITLE_HEADING: Selector = Selector::parse("h1.title").unwrap();
  static ref AUTHOR_LINKS: Selector = Selector::parse("div.authors a").unwrap();
  static ref ABSTRACT_BLOCK: Selector = Selector::parse("blockquote.abstract").unwrap();
}

/// Metadata extracted from an abstract page.
#[derive(Debug)]
pub(crate) struct AbstractPage {
  pub title:         String,
  pub authors:       String,
  pub abstract_text: String,
}

/// Retrieves an arXiv paper: scrapes metadata, downloads the PDF.
///
/// The identifier is validated against the `\d{4}.\d{4,5}` pattern before
/// any network call; classification already guarantees this for URL inputs
/// but direct callers get the same check.
pub(crate) async fn fetch(ingestor: &Ingestor, id: &str) -> Result<NewDocument> {
  if !ARXIV_ID.is_match(id) {
    return Err(ShelfError::InvalidIdentifier);
  }

  let abs_url = format!("https://arxiv.org/abs/{id}");
  let response =
    ingestor.client().get(&abs_url).send().await.map_err(|e| fetch_error(&abs_url, e))?;
  if !response.status().is_success() {
    return Err(ShelfError::Fetch(format!("{abs_url} returned {}", response.status())));
  }
  let html = response.text().await?;
  let page = parse_abstract_page(&html)?;
  trace!("Scraped \"{}\" from {abs_url}", page.title);

  let pdf_url = format!("https://arxiv.org/pdf/{id}");
  let dest = ingestor.storage_path().join(format!("{id}.pdf"));
  let response =
    ingestor.client().get(&pdf_url).send().await.map_err(|e| fetch_error(&pdf_url, e))?;
  if !response.status().is_success() {
    return Err(ShelfError::Fetch(format!("{pdf_url} returned {}", response.status())));
  }
  storage::download_to(response, &dest).await?;

  Ok(NewDocument {
    external_id:      id.to_string(),
    title:            page.title,
    authors:          Some(page.authors),
    abstract_text:    Some(page.abstract_text),
    content_location: dest.to_string_lossy().into_owned(),
    source_url:       Some(abs_url),
  })
}

/// Extracts title, authors, and abstract from abstract-page HTML.
///
/// # Errors
///
/// [`ShelfError::Scrape`] when the abstract container or any of the three
/// blocks inside it is absent: the page structure changed, or the id does
/// not exist.
pub(crate) fn parse_abstract_page(html: &str) -> Result<AbstractPage> {
  let document = Html::parse_document(html);
  let container = document
    .select(&ABS_CONTAINER)
    .next()
    .ok_or_else(|| ShelfError::Scrape("abstract container missing".into()))?;

  let title = container
    .select(&TITLE_HEADING)
    .next()
    .ok_or_else(|| ShelfError::Scrape("title heading missing".into()))?
    .text()
    .collect::<String>();
  let title = strip_label(&title, "Title:");
  if title.is_empty() {
    return Err(ShelfError::Scrape("title heading empty".into()));
  }

  let authors =
    container.select(&AUTHOR_LINKS).map(|a| a.text().collect::<String>()).collect::<Vec<_>>();
  if authors.is_empty() {
    return Err(ShelfError::Scrape("author list missing".into()));
  }

  let abstract_text = container
    .select(&ABSTRACT_BLOCK)
    .next()
    .ok_or_else(|| ShelfError::Scrape("abstract block missing".into()))?
    .text()
    .collect::<String>();

  Ok(AbstractPage {
    title,
    authors: authors.join(", "),
    abstract_text: strip_label(&abstract_text, "Abstract:"),
  })
}

/// Drops a literal descriptor label prefix, if present, and trims.
fn strip_label(text: &str, label: &str) -> String {
  let text = text.trim();
  text.strip_prefix(label).unwrap_or(text).trim().to_string()
}
