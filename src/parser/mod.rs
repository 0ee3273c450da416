pub mod blocks;
pub mod classify;
pub mod extract;

use tracing::trace;

use crate::records::{CandidateFiling, SpacRecord};
use extract::ticker::TieBreak;

/// Two-pass pipeline: classify → (paragraphs → fields).
///
/// `None` when the document is not a blank-check disclosure; otherwise a
/// record carrying whatever name/ticker could be read, possibly empty.
pub fn process_filing(filing: &CandidateFiling, tie_break: TieBreak) -> Option<SpacRecord> {
    if !classify::is_blank_check(&filing.content) {
        trace!("{} is not a blank check filing", filing.document_url);
        return None;
    }

    let paragraphs = blocks::paragraphs(&filing.content);
    let fields = extract::extract_all(&paragraphs, tie_break);
    trace!(
        "{}: {} paragraph(s), name={:?} ticker={:?}",
        filing.document_url,
        paragraphs.len(),
        fields.name,
        fields.ticker
    );

    Some(SpacRecord {
        name: fields.name,
        ticker: fields.ticker,
        date: filing.filing_date.clone(),
        link: filing.document_url.clone(),
        content: filing.content.clone(),
    })
}
