use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::PublishError;
use crate::http::Fetch;
use crate::records::SpacRecord;

/// What to do with the source document bytes in the outbound payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkContent {
    /// Leave `link_content` out.
    #[default]
    Omit,
    /// Ship the document as base64 in `link_content`.
    Base64,
}

#[derive(Debug, Serialize)]
pub struct Payload<'a> {
    pub data: Vec<WireRecord<'a>>,
}

#[derive(Debug, Serialize)]
pub struct WireRecord<'a> {
    pub name: &'a str,
    pub ticker: &'a str,
    pub date: &'a str,
    pub link: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_content: Option<String>,
}

pub fn build_payload(records: &[SpacRecord], link_content: LinkContent) -> Payload<'_> {
    let data = records
        .iter()
        .map(|r| WireRecord {
            name: &r.name,
            ticker: &r.ticker,
            date: &r.date,
            link: &r.link,
            link_content: match link_content {
                LinkContent::Omit => None,
                LinkContent::Base64 => {
                    Some(base64::engine::general_purpose::STANDARD.encode(&r.content))
                }
            },
        })
        .collect();
    Payload { data }
}

/// POST the records to the sink, once. A non-success status is logged and
/// otherwise ignored; only a transport failure is an error.
pub async fn submit<C: Fetch>(
    client: &C,
    sink_url: &str,
    records: &[SpacRecord],
    link_content: LinkContent,
) -> Result<u16, PublishError> {
    let body = serde_json::to_vec(&build_payload(records, link_content))?;
    info!("Submitting {} record(s) to {}", records.len(), sink_url);

    let status = client.post_json(sink_url, body).await?;
    if (200..300).contains(&status) {
        info!("Sink accepted submission (HTTP {})", status);
    } else {
        warn!("Sink answered HTTP {}; not retrying", status);
    }
    Ok(status)
}
