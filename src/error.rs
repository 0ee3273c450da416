use thiserror::Error;

/// A single HTTP exchange failed. Per-document: the filing is dropped.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// The filings feed is unusable. Fatal for the whole run.
#[derive(Debug, Error)]
pub enum FeedFormatError {
    #[error("could not download feed: {0}")]
    Fetch(#[from] FetchError),

    #[error("feed is not well-formed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("feed has no <feed> root element")]
    MissingRoot,

    #[error("entry link has no href attribute")]
    MissingHref,

    #[error("entry link {0:?} has no filer segment")]
    MissingFilerSegment(String),
}

/// A filer's submissions history could not be resolved. Per-filer.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("could not download submissions: {0}")]
    Fetch(#[from] FetchError),

    #[error("submissions JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "filings.recent arrays differ in length (accessionNumber={accessions}, form={forms}, \
         primaryDocument={documents}, filingDate={dates})"
    )]
    LengthMismatch {
        accessions: usize,
        forms: usize,
        documents: usize,
        dates: usize,
    },

    #[error("filing date {date:?} is not YYYY-MM-DD: {source}")]
    BadDate {
        date: String,
        #[source]
        source: chrono::ParseError,
    },
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("could not encode payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("submission failed: {0}")]
    Fetch(#[from] FetchError),
}
