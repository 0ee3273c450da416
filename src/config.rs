use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::aggregate::AggregationPolicy;
use crate::parser::extract::ticker::TieBreak;
use crate::publish::LinkContent;

const CONFIG_FILE: &str = "spac_scanner";
const ENV_PREFIX: &str = "SPAC";

/// Run settings. Every field has a default; `spac_scanner.toml` and
/// `SPAC_*` environment variables override them, in that order.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// EDGAR rejects requests without a declared user agent.
    pub user_agent: String,
    pub feed_url: String,
    pub submissions_url: String,
    pub archives_url: String,
    pub sink_url: String,
    /// Substring a filing's form type must contain to be considered.
    pub form_marker: String,
    pub timeout_secs: u64,
    /// Filers resolved and fetched at the same time.
    pub concurrency: usize,
    pub aggregation: AggregationPolicy,
    pub ticker_tiebreak: TieBreak,
    pub link_content: LinkContent,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            user_agent: "Mozilla/5.0".to_string(),
            feed_url: "https://www.sec.gov/cgi-bin/browse-edgar?action=getcurrent&CIK=&type=S-1\
                       &company=&dateb=&owner=include&start=0&count=100&output=atom"
                .to_string(),
            submissions_url: "https://data.sec.gov/submissions".to_string(),
            archives_url: "https://www.sec.gov/Archives/edgar/data".to_string(),
            sink_url: "https://coe892-project-server.onrender.com/spacs".to_string(),
            form_marker: "S-1".to_string(),
            timeout_secs: 30,
            concurrency: 4,
            aggregation: AggregationPolicy::PerFiler,
            ticker_tiebreak: TieBreak::Shortest,
            link_content: LinkContent::Omit,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let settings: Settings = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        if settings.concurrency == 0 {
            anyhow::bail!("concurrency must be at least 1");
        }
        Ok(settings)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `{submissions_url}/CIK##########.json`, the filer id zero-padded to ten digits.
    pub fn submissions_url_for(&self, filer_id: &str) -> String {
        format!(
            "{}/CIK{:0>10}.json",
            self.submissions_url.trim_end_matches('/'),
            filer_id
        )
    }

    pub fn document_url_for(&self, filer_id: &str, accession: &str, document: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.archives_url.trim_end_matches('/'),
            filer_id,
            accession.replace('-', ""),
            document
        )
    }
}
