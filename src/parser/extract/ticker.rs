use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::parser::blocks::Paragraph;

/// Paragraphs worth tokenizing.
static TRIGGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"under the (?:new ticker )?symbol").unwrap());

/// A token window that announces a ticker, and how to read the ticker out of
/// the token that follows it.
#[derive(Debug, Clone, Copy)]
pub struct TokenRule {
    pub pattern: &'static [&'static str],
    pub candidate: fn(&str) -> Option<String>,
}

pub const DEFAULT_RULES: &[TokenRule] = &[
    TokenRule {
        pattern: &["under", "the", "new", "ticker", "symbols"],
        candidate: strip_quotes,
    },
    TokenRule {
        pattern: &["under", "the", "new", "ticker", "symbol"],
        candidate: strip_quotes,
    },
    TokenRule {
        pattern: &["under", "the", "symbols"],
        candidate: strip_quotes,
    },
    TokenRule {
        pattern: &["under", "the", "symbol"],
        candidate: strip_quotes,
    },
];

/// Which candidate wins when a document yields several.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Fewest characters; earlier candidates win ties. Wordy matches are
    /// usually prose, the bare ticker is usually the shortest.
    #[default]
    Shortest,
    /// First in document order.
    First,
}

/// Drop the first and last character (the quotes around `"ABCD"`).
pub fn strip_quotes(token: &str) -> Option<String> {
    let mut chars = token.chars();
    chars.next();
    chars.next_back();
    let inner = chars.as_str();
    (!inner.is_empty()).then(|| inner.to_string())
}

/// Every candidate in document order: paragraph, then token position, then rule.
pub fn candidates(paragraphs: &[Paragraph], rules: &[TokenRule]) -> Vec<String> {
    let mut found = Vec::new();

    for p in paragraphs.iter().filter(|p| TRIGGER_RE.is_match(&p.text)) {
        let words: Vec<&str> = p.text.split_whitespace().collect();
        // `end` is one past the last pattern token; the candidate is words[end]
        for end in 1..words.len() {
            for rule in rules {
                let len = rule.pattern.len();
                if end >= len && words[end - len..end] == *rule.pattern {
                    if let Some(ticker) = (rule.candidate)(words[end]) {
                        found.push(ticker);
                    }
                }
            }
        }
    }

    found
}

/// The ticker announced in the document, or empty if none.
pub fn extract(paragraphs: &[Paragraph], rules: &[TokenRule], tie_break: TieBreak) -> String {
    let mut found = candidates(paragraphs, rules);
    if tie_break == TieBreak::Shortest {
        found.sort_by_key(|t| t.chars().count());
    }
    found.into_iter().next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paras(texts: &[&str]) -> Vec<Paragraph> {
        texts
            .iter()
            .map(|t| Paragraph {
                style: None,
                text: t.to_string(),
            })
            .collect()
    }

    fn shortest(texts: &[&str]) -> String {
        extract(&paras(texts), DEFAULT_RULES, TieBreak::Shortest)
    }

    #[test]
    fn new_ticker_symbol_sentence() {
        assert_eq!(
            shortest(&[r#"He will trade under the new ticker symbol "ABCD" on Nasdaq."#]),
            "ABCD"
        );
    }

    #[test]
    fn plain_symbol_sentence() {
        assert_eq!(
            shortest(&[r#"Our units will trade on the Nasdaq Global Market under the symbol "EXHCU"."#]),
            "EXHCU\""
        );
        assert_eq!(
            shortest(&[r#"Units trade under the symbol "EXHCU," and rights under the symbols "EXHR" respectively."#]),
            "EXHR"
        );
    }

    #[test]
    fn shortest_candidate_wins_across_paragraphs() {
        let texts = [
            r#"We intend to list our units under the symbol “ACMEU,” and our Class A ordinary shares and warrants"#,
            r#"expected to trade under the symbols “ACME” and “ACMEW,” respectively."#,
        ];
        assert_eq!(shortest(&texts), "ACME");
        assert_eq!(
            extract(&paras(&texts), DEFAULT_RULES, TieBreak::First),
            "ACMEU,"
        );
    }

    #[test]
    fn pattern_at_start_of_paragraph() {
        assert_eq!(shortest(&[r#"under the symbol "ABCD" today"#]), "ABCD");
        assert_eq!(shortest(&[r#"under the new ticker symbol "WXYZ""#]), "WXYZ");
    }

    #[test]
    fn equal_length_keeps_document_order() {
        let texts = [r#"under the symbol "AAAA" and later under the symbol "BBBB" too"#];
        assert_eq!(shortest(&texts), "AAAA");
    }

    #[test]
    fn paragraph_without_trigger_is_ignored() {
        assert_eq!(shortest(&[r#"listed under the ticker symbol "QQQ" today"#]), "");
        assert_eq!(shortest(&[r#"shares trade on the NYSE as "XYZ""#]), "");
    }

    #[test]
    fn pattern_at_end_of_paragraph_has_no_candidate() {
        assert_eq!(shortest(&["shares will trade under the symbol"]), "");
    }

    #[test]
    fn no_matches_is_empty() {
        assert_eq!(shortest(&["No ticker here."]), "");
        assert_eq!(shortest(&[]), "");
    }

    #[test]
    fn strip_quotes_handles_multibyte_and_short_tokens() {
        assert_eq!(strip_quotes("“ABCD”").as_deref(), Some("ABCD"));
        assert_eq!(strip_quotes("\"A\""), Some("A".to_string()));
        assert_eq!(strip_quotes("\""), None);
        assert_eq!(strip_quotes("\"\""), None);
    }

    #[test]
    fn custom_rules_plug_in() {
        let rules = [TokenRule {
            pattern: &["ticker:"],
            candidate: |t| Some(t.trim_matches('.').to_string()),
        }];
        assert_eq!(
            extract(&paras(&["listed under the symbol ticker: ZZZ."]), &rules, TieBreak::Shortest),
            "ZZZ"
        );
    }
}
