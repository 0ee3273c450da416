use std::borrow::Cow;

use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

/// One `<p>` element of a filing document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub style: Option<String>,
    /// Concatenated text of the element and its descendants, entities decoded.
    pub text: String,
}

/// Scan an EDGAR HTML document into its paragraphs.
///
/// EDGAR filings are HTML, not XML: void elements (`<br>`) never close and
/// end tags may not match, so name checks are off. A hard markup error stops
/// the scan and returns what was collected up to that point.
///
/// A bare `<` in text still opens a tag, so `<p>a < b</p>` loses everything
/// up to the next `>`. Filings escape it as `&lt;`.
pub fn paragraphs(html: &[u8]) -> Vec<Paragraph> {
    let mut reader = quick_xml::Reader::from_reader(html);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut out = Vec::new();
    let mut current: Option<Paragraph> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if is_paragraph(&e) => {
                // <p> cannot nest; an open one is implicitly closed
                if let Some(p) = current.take() {
                    out.push(p);
                }
                current = Some(Paragraph {
                    style: style_of(&e),
                    text: String::new(),
                });
            }
            Ok(Event::Empty(e)) if is_paragraph(&e) => {
                if let Some(p) = current.take() {
                    out.push(p);
                }
                out.push(Paragraph {
                    style: style_of(&e),
                    text: String::new(),
                });
            }
            Ok(Event::End(e)) if e.local_name().as_ref().eq_ignore_ascii_case(b"p") => {
                if let Some(p) = current.take() {
                    out.push(p);
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(p) = current.as_mut() {
                    p.text.push_str(&decode_text(&e));
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(p) = current.as_mut() {
                    p.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                debug!(
                    "Markup error at byte {}: {}; keeping {} paragraph(s)",
                    reader.buffer_position(),
                    e,
                    out.len()
                );
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    if let Some(p) = current {
        out.push(p);
    }
    out
}

fn is_paragraph(e: &BytesStart) -> bool {
    e.local_name().as_ref().eq_ignore_ascii_case(b"p")
}

fn style_of(e: &BytesStart) -> Option<String> {
    e.html_attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref().eq_ignore_ascii_case(b"style"))
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

/// Decode character references and HTML named entities (`&nbsp;`, `&#8220;`)
/// one at a time. A reference that does not resolve is kept verbatim.
fn decode_text(raw: &[u8]) -> String {
    let raw = String::from_utf8_lossy(raw);
    let mut out = String::with_capacity(raw.len());
    let mut rest: &str = &raw;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let reference = tail
            .char_indices()
            .take(MAX_REFERENCE_LEN)
            .find(|&(_, c)| c == ';')
            .and_then(|(end, _)| resolve_reference(&tail[..end]).map(|s| (end, s)));

        match reference {
            Some((end, decoded)) => {
                out.push_str(&decoded);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Longest reference body scanned for a closing `;`.
const MAX_REFERENCE_LEN: usize = 32;

/// `name` is the text between `&` and `;`.
fn resolve_reference(name: &str) -> Option<Cow<'static, str>> {
    let Some(num) = name.strip_prefix('#') else {
        return resolve_html5_entity(name).map(Cow::Borrowed);
    };
    let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => num.parse::<u32>().ok()?,
    };
    char::from_u32(code).map(|c| Cow::Owned(c.to_string()))
}
