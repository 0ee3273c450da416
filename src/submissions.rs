use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::config::Settings;
use crate::error::ResolutionError;
use crate::http::Fetch;
use crate::records::CandidateFiling;

/// `data.sec.gov/submissions/CIK##########.json`, trimmed to what we read.
#[derive(Debug, Deserialize)]
pub struct Submissions {
    #[serde(default)]
    pub name: Option<String>,
    pub filings: Filings,
}

#[derive(Debug, Deserialize)]
pub struct Filings {
    pub recent: RecentFilings,
}

/// Parallel arrays, one index per filing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFilings {
    pub accession_number: Vec<String>,
    pub form: Vec<String>,
    pub primary_document: Vec<String>,
    pub filing_date: Vec<String>,
}

/// One row of [`RecentFilings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingEntry<'a> {
    pub accession_number: &'a str,
    pub form: &'a str,
    pub primary_document: &'a str,
    pub filing_date: &'a str,
}

impl RecentFilings {
    /// Zip the arrays into rows, refusing arrays of unequal length.
    pub fn entries(&self) -> Result<Vec<FilingEntry<'_>>, ResolutionError> {
        let len = self.accession_number.len();
        if self.form.len() != len
            || self.primary_document.len() != len
            || self.filing_date.len() != len
        {
            return Err(ResolutionError::LengthMismatch {
                accessions: len,
                forms: self.form.len(),
                documents: self.primary_document.len(),
                dates: self.filing_date.len(),
            });
        }

        Ok((0..len)
            .map(|i| FilingEntry {
                accession_number: &self.accession_number[i],
                form: &self.form[i],
                primary_document: &self.primary_document[i],
                filing_date: &self.filing_date[i],
            })
            .collect())
    }
}

/// Fetch a filer's submissions and return its filings of the target form.
pub async fn resolve<C: Fetch>(
    client: &C,
    settings: &Settings,
    filer_id: &str,
) -> Result<Vec<CandidateFiling>, ResolutionError> {
    let url = settings.submissions_url_for(filer_id);
    let body = client.get(&url).await?;
    let submissions: Submissions = serde_json::from_slice(&body)?;

    let filings = select_filings(&submissions, settings, filer_id)?;
    debug!(
        "Filer {} ({}): {} {} filing(s)",
        filer_id,
        submissions.name.as_deref().unwrap_or("unnamed"),
        filings.len(),
        settings.form_marker
    );
    Ok(filings)
}

/// Entries whose form contains the marker, in their original order.
pub fn select_filings(
    submissions: &Submissions,
    settings: &Settings,
    filer_id: &str,
) -> Result<Vec<CandidateFiling>, ResolutionError> {
    submissions
        .filings
        .recent
        .entries()?
        .into_iter()
        .filter(|e| e.form.contains(settings.form_marker.as_str()))
        .map(|e| {
            Ok(CandidateFiling {
                filer_id: filer_id.to_string(),
                accession_number: e.accession_number.to_string(),
                form: e.form.to_string(),
                filing_date: long_date(e.filing_date)?,
                document_url: settings.document_url_for(
                    filer_id,
                    e.accession_number,
                    e.primary_document,
                ),
                content: Vec::new(),
            })
        })
        .collect()
}

/// "2024-03-04" -> "March 04, 2024".
pub fn long_date(iso: &str) -> Result<String, ResolutionError> {
    let date = NaiveDate::parse_from_str(iso, "%Y-%m-%d").map_err(|source| {
        ResolutionError::BadDate {
            date: iso.to_string(),
            source,
        }
    })?;
    Ok(date.format("%B %d, %Y").to_string())
}
