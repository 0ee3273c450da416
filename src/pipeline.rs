use std::time::Instant;

use anyhow::{Context, Result};
use futures::{stream, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::aggregate;
use crate::config::Settings;
use crate::error::{FetchError, ResolutionError};
use crate::feed;
use crate::http::Fetch;
use crate::parser::{self, blocks, classify, extract};
use crate::records::{CandidateFiling, SpacRecord};
use crate::submissions;

/// A filer that produced nothing because its history could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFiler {
    pub filer_id: String,
    pub reason: String,
}

/// Outcome of one batch run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub records: Vec<SpacRecord>,
    pub filers: usize,
    pub filings: usize,
    pub fetch_errors: usize,
    pub blank_check: usize,
    pub skipped: Vec<SkippedFiler>,
}

impl RunReport {
    pub fn log_summary(&self) {
        info!(
            "Scanned {} filer(s), {} filing(s): {} fetch error(s), {} blank check document(s), {} record(s)",
            self.filers,
            self.filings,
            self.fetch_errors,
            self.blank_check,
            self.records.len()
        );
        if !self.skipped.is_empty() {
            warn!("Skipped {} filer(s):", self.skipped.len());
            for s in &self.skipped {
                warn!("  {}: {}", s.filer_id, s.reason);
            }
        }
    }
}

/// A filer's resolved filings, content populated for every fetch that worked.
struct Gathered {
    fetched: Vec<CandidateFiling>,
    resolved: usize,
    fetch_errors: usize,
}

/// Unique filer ids from the feed, in sorted order, capped at `limit`.
pub async fn discover<C: Fetch>(
    client: &C,
    settings: &Settings,
    limit: Option<usize>,
) -> Result<Vec<String>> {
    let filers = feed::fetch_filers(client, &settings.feed_url)
        .await
        .context("Filer discovery failed")?;
    Ok(filers.into_iter().take(limit.unwrap_or(usize::MAX)).collect())
}

/// Discovery → resolve + fetch (bounded concurrency across filers) →
/// classify + extract (rayon) → aggregate.
///
/// Only a feed failure aborts; resolver and fetch failures are isolated to
/// their filer or document and show up in the report.
pub async fn run<C: Fetch>(
    client: &C,
    settings: &Settings,
    limit: Option<usize>,
) -> Result<RunReport> {
    let t0 = Instant::now();
    let filers = discover(client, settings, limit).await?;
    let mut report = RunReport {
        filers: filers.len(),
        ..Default::default()
    };

    // Phase 1: resolve and fetch
    let pb = ProgressBar::new(filers.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} filers ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let gathered: Vec<(String, Result<Gathered, ResolutionError>)> = stream::iter(filers)
        .map(|filer_id| {
            let pb = pb.clone();
            async move {
                let result = gather_filer(client, settings, &filer_id).await;
                pb.inc(1);
                (filer_id, result)
            }
        })
        .buffered(settings.concurrency)
        .collect()
        .await;
    pb.finish_and_clear();

    let mut ready = Vec::with_capacity(gathered.len());
    for (filer_id, result) in gathered {
        match result {
            Ok(g) => {
                report.filings += g.resolved;
                report.fetch_errors += g.fetch_errors;
                ready.push((filer_id, g.fetched));
            }
            Err(e) => {
                warn!("Skipping filer {}: {}", filer_id, e);
                report.skipped.push(SkippedFiler {
                    filer_id,
                    reason: e.to_string(),
                });
            }
        }
    }
    info!(
        "Fetched {} document(s) for {} filer(s) in {:.1}s",
        report.filings - report.fetch_errors,
        ready.len(),
        t0.elapsed().as_secs_f64()
    );

    // Phase 2: classify and extract, one pure pass per document
    let tie_break = settings.ticker_tiebreak;
    let extracted: Vec<(String, Vec<SpacRecord>)> = ready
        .into_par_iter()
        .map(|(filer_id, filings)| {
            let records = filings
                .iter()
                .filter_map(|f| parser::process_filing(f, tie_break))
                .collect();
            (filer_id, records)
        })
        .collect();

    // Phase 3: aggregate, per filer, in resolver order
    for (filer_id, records) in extracted {
        report.blank_check += records.len();
        let published = aggregate::aggregate_filer(&records, settings.aggregation);
        debug!(
            "Filer {}: {} blank check filing(s) -> {} record(s)",
            filer_id,
            records.len(),
            published.len()
        );
        report.records.extend(published);
    }

    info!("Run finished in {:.1}s", t0.elapsed().as_secs_f64());
    Ok(report)
}

async fn gather_filer<C: Fetch>(
    client: &C,
    settings: &Settings,
    filer_id: &str,
) -> Result<Gathered, ResolutionError> {
    let filings = submissions::resolve(client, settings, filer_id).await?;
    let resolved = filings.len();
    let mut fetched = Vec::with_capacity(resolved);
    let mut fetch_errors = 0;

    for mut filing in filings {
        match client.get(&filing.document_url).await {
            Ok(content) => {
                filing.content = content;
                fetched.push(filing);
            }
            Err(e) => {
                warn!(
                    "Filer {}: dropping {} ({}): {}",
                    filer_id, filing.accession_number, filing.form, e
                );
                fetch_errors += 1;
            }
        }
    }

    Ok(Gathered {
        fetched,
        resolved,
        fetch_errors,
    })
}

/// Classification and extraction results for a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub url: String,
    pub bytes: usize,
    pub paragraphs: usize,
    pub blank_check: bool,
    pub name: String,
    pub ticker: String,
    pub ticker_candidates: Vec<String>,
}

/// Fetch one document and run every heuristic on it, regardless of class.
pub async fn inspect<C: Fetch>(
    client: &C,
    url: &str,
    settings: &Settings,
) -> Result<Inspection, FetchError> {
    let content = client.get(url).await?;
    let paragraphs = blocks::paragraphs(&content);
    let fields = extract::extract_all(&paragraphs, settings.ticker_tiebreak);

    Ok(Inspection {
        url: url.to_string(),
        bytes: content.len(),
        paragraphs: paragraphs.len(),
        blank_check: classify::is_blank_check(&content),
        name: fields.name,
        ticker: fields.ticker,
        ticker_candidates: extract::ticker::candidates(
            &paragraphs,
            extract::ticker::DEFAULT_RULES,
        ),
    })
}
