use serde::Deserialize;

use crate::records::SpacRecord;

/// How a filer's extracted filings become published records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// One record per filer: best known facts about the entity.
    #[default]
    PerFiler,
    /// One record per blank-check filing: one per disclosure event.
    PerFiling,
}

/// Fold records, in filing order, into one: the first non-empty value of
/// each field wins. The document content follows the winning link.
pub fn consolidate<'a, I>(records: I) -> SpacRecord
where
    I: IntoIterator<Item = &'a SpacRecord>,
{
    records
        .into_iter()
        .fold(SpacRecord::default(), |merged, r| SpacRecord {
            name: first_non_empty(merged.name, &r.name),
            ticker: first_non_empty(merged.ticker, &r.ticker),
            date: first_non_empty(merged.date, &r.date),
            content: if merged.link.is_empty() && !r.link.is_empty() {
                r.content.clone()
            } else {
                merged.content
            },
            link: first_non_empty(merged.link, &r.link),
        })
}

fn first_non_empty(current: String, candidate: &str) -> String {
    if current.is_empty() {
        candidate.to_string()
    } else {
        current
    }
}

/// Publishable records for one filer, given its extracted filings in
/// resolver order.
pub fn aggregate_filer(records: &[SpacRecord], policy: AggregationPolicy) -> Vec<SpacRecord> {
    match policy {
        AggregationPolicy::PerFiler => {
            let merged = consolidate(records);
            if merged.is_complete() {
                vec![merged]
            } else {
                Vec::new()
            }
        }
        AggregationPolicy::PerFiling => records
            .iter()
            .filter(|r| r.is_complete())
            .cloned()
            .collect(),
    }
}
