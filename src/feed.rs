use std::collections::BTreeSet;

use quick_xml::events::{BytesStart, Event};
use tracing::info;

use crate::error::FeedFormatError;
use crate::http::Fetch;

/// Index of the filer id in an entry href split on '/':
/// `https://www.sec.gov/Archives/edgar/data/<filer>/...`.
const FILER_SEGMENT: usize = 6;

/// Fetch the current-filings Atom feed and return the unique filer ids in it.
pub async fn fetch_filers<C: Fetch>(
    client: &C,
    feed_url: &str,
) -> Result<BTreeSet<String>, FeedFormatError> {
    info!("Fetching filings feed: {}", feed_url);
    let body = client.get(feed_url).await?;
    let xml = String::from_utf8_lossy(&body);

    let filers = parse_filers(&xml)?;
    info!("Unique filers in feed: {}", filers.len());
    Ok(filers)
}

/// Collect the filer id of every `<link>` that sits directly inside an
/// `<entry>` of the `<feed>` root.
pub fn parse_filers(xml: &str) -> Result<BTreeSet<String>, FeedFormatError> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut filers = BTreeSet::new();
    let mut seen_root = false;
    let mut depth = 0usize;
    let mut in_entry = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                depth += 1;
                match (depth, e.local_name().as_ref()) {
                    (1, b"feed") => seen_root = true,
                    (2, b"entry") if seen_root => in_entry = true,
                    (3, b"link") if in_entry => {
                        filers.insert(filer_from_link(&e)?);
                    }
                    _ => {}
                }
            }
            Event::Empty(e) => {
                if depth == 2 && in_entry && e.local_name().as_ref() == b"link" {
                    filers.insert(filer_from_link(&e)?);
                }
            }
            Event::End(_) => {
                if depth == 2 {
                    in_entry = false;
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(FeedFormatError::MissingRoot);
    }
    Ok(filers)
}

fn filer_from_link(link: &BytesStart) -> Result<String, FeedFormatError> {
    let href = link
        .try_get_attribute("href")
        .ok()
        .flatten()
        .ok_or(FeedFormatError::MissingHref)?;
    let raw = String::from_utf8_lossy(&href.value);
    let href = quick_xml::escape::unescape(&raw)
        .map(|h| h.into_owned())
        .unwrap_or_else(|_| raw.to_string());

    match href.split('/').nth(FILER_SEGMENT) {
        Some(filer) if !filer.is_empty() => Ok(filer.to_string()),
        _ => Err(FeedFormatError::MissingFilerSegment(href)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::stub::StubClient;

    #[test]
    fn fixture_feed_dedups_filers() {
        let xml = std::fs::read_to_string("tests/fixtures/current_s1.atom").unwrap();
        let filers = parse_filers(&xml).unwrap();
        let ids: Vec<&str> = filers.iter().map(String::as_str).collect();
        // 1000045 appears in two entries
        assert_eq!(ids, vec!["0000112233", "1000045", "1869673"]);
    }

    #[test]
    fn only_entry_links_count() {
        let xml = r#"<?xml version="1.0" encoding="ISO-8859-1" ?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <link href="https://www.sec.gov/cgi-bin/browse-edgar/extra/segments/here/999"/>
  <entry>
    <title>S-1 - Alpha Acquisition Corp (0002000001) (Filer)</title>
    <link rel="alternate" type="text/html" href="https://www.sec.gov/Archives/edgar/data/2000001/000200000124000001/0002000001-24-000001-index.htm"/>
  </entry>
</feed>"#;
        let filers = parse_filers(xml).unwrap();
        assert_eq!(filers.len(), 1);
        assert!(filers.contains("2000001"));
    }

    #[test]
    fn empty_feed_is_not_an_error() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>none</title></feed>"#;
        assert!(parse_filers(xml).unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_format_error() {
        let xml = r#"<rss><entry><link href="a/b/c/d/e/f/123"/></entry></rss>"#;
        assert!(matches!(
            parse_filers(xml),
            Err(FeedFormatError::MissingRoot)
        ));
    }

    #[test]
    fn link_without_href_is_format_error() {
        let xml = r#"<feed><entry><link rel="alternate"/></entry></feed>"#;
        assert!(matches!(
            parse_filers(xml),
            Err(FeedFormatError::MissingHref)
        ));
    }

    #[test]
    fn short_href_is_format_error() {
        let xml = r#"<feed><entry><link href="https://www.sec.gov/short"/></entry></feed>"#;
        assert!(matches!(
            parse_filers(xml),
            Err(FeedFormatError::MissingFilerSegment(_))
        ));
    }

    #[test]
    fn broken_xml_is_format_error() {
        let xml = r#"<feed><entry><link href="x"></entry></feed>"#;
        assert!(parse_filers(xml).is_err());
    }

    #[tokio::test]
    async fn download_failure_is_fatal() {
        let client = StubClient::new();
        let err = fetch_filers(&client, "https://feed.test/atom").await.unwrap_err();
        assert!(matches!(err, FeedFormatError::Fetch(_)));
    }
}
