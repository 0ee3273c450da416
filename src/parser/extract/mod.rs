pub mod name;
pub mod ticker;

use super::blocks::Paragraph;
use ticker::{TieBreak, DEFAULT_RULES};

/// Fields read from one blank-check document. Either may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub name: String,
    pub ticker: String,
}

pub fn extract_all(paragraphs: &[Paragraph], tie_break: TieBreak) -> Extraction {
    Extraction {
        name: name::extract(paragraphs),
        ticker: ticker::extract(paragraphs, DEFAULT_RULES, tie_break),
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::blocks::paragraphs;

    fn parse(fixture: &str) -> Vec<Paragraph> {
        let html = std::fs::read(format!("tests/fixtures/{}.htm", fixture)).unwrap();
        paragraphs(&html)
    }

    #[test]
    fn example_holdings_cover_page() {
        let e = extract_all(&parse("exhc_s1"), TieBreak::Shortest);
        assert_eq!(e.name, "Example Holdings Corp.");
        assert_eq!(e.ticker, "EXHC");
    }

    #[test]
    fn amendment_has_name_but_no_ticker() {
        let e = extract_all(&parse("exhc_s1a"), TieBreak::Shortest);
        assert_eq!(e.name, "Example Holdings Corp.");
        assert_eq!(e.ticker, "");
    }

    #[test]
    fn curly_quoted_units_and_shares() {
        let e = extract_all(&parse("orion_s1"), TieBreak::Shortest);
        assert_eq!(e.name, "");
        assert_eq!(e.ticker, "ORAC");
    }

    #[test]
    fn stray_ampersand_does_not_spoil_quoted_ticker() {
        let ps = paragraphs(
            b"<p>Shares of AT&T Partners will trade under the symbol &#8220;ABCD&#8221; on Nasdaq.</p>",
        );
        assert_eq!(extract_all(&ps, TieBreak::Shortest).ticker, "ABCD");
    }

    #[test]
    fn operating_company_fields_still_extract() {
        // classification is a separate step; extraction alone is best-effort
        let e = extract_all(&parse("operating_s1"), TieBreak::Shortest);
        assert_eq!(e.name, "Widget Works, Inc.");
        assert_eq!(e.ticker, "WDGT");
    }
}
