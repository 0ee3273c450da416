/// One S-1 family filing of a filer, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFiling {
    pub filer_id: String,
    pub accession_number: String,
    pub form: String,
    /// Long form, e.g. "March 04, 2024".
    pub filing_date: String,
    pub document_url: String,
    /// Raw document bytes; empty until fetched.
    pub content: Vec<u8>,
}

/// Extracted (and later merged) facts about a SPAC.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpacRecord {
    pub name: String,
    pub ticker: String,
    pub date: String,
    pub link: String,
    /// Bytes of the document credited by `link`.
    pub content: Vec<u8>,
}

impl SpacRecord {
    /// Only records with both a name and a ticker are published.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.ticker.is_empty()
    }
}
