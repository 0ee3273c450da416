use crate::parser::blocks::Paragraph;

/// Inline style filers put on the registrant's name on the S-1 cover page.
const COVER_NAME_STYLE: &[(&str, &str)] = &[
    ("margin-top", "6pt"),
    ("margin-bottom", "0pt"),
    ("font-size", "22pt"),
    ("font-family", "Times New Roman"),
];

/// Text of the first cover-name paragraph, or empty if there is none.
pub fn extract(paragraphs: &[Paragraph]) -> String {
    paragraphs
        .iter()
        .find(|p| p.style.as_deref().is_some_and(is_cover_name_style))
        .map(|p| p.text.trim().replace("\r\n", " ").replace('\n', " "))
        .unwrap_or_default()
}

/// Same declarations as [`COVER_NAME_STYLE`], ignoring order, spacing and
/// property-name case.
fn is_cover_name_style(style: &str) -> bool {
    let declarations: Vec<(String, &str)> = style
        .split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            Some((prop.trim().to_ascii_lowercase(), value.trim()))
        })
        .collect();

    declarations.len() == COVER_NAME_STYLE.len()
        && COVER_NAME_STYLE.iter().all(|(prop, value)| {
            declarations
                .iter()
                .any(|(p, v)| p == prop && v == value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(style: Option<&str>, text: &str) -> Paragraph {
        Paragraph {
            style: style.map(str::to_string),
            text: text.to_string(),
        }
    }

    const STYLE: &str = "margin-top:6pt; margin-bottom:0pt; font-size:22pt; font-family:Times New Roman";

    #[test]
    fn finds_cover_name() {
        let ps = vec![
            para(Some("font-size:10pt"), "UNITED STATES"),
            para(Some(STYLE), "\n  Example Holdings\nCorp.  \n"),
            para(Some(STYLE), "Second Match Inc."),
        ];
        assert_eq!(extract(&ps), "Example Holdings Corp.");
    }

    #[test]
    fn declaration_order_and_spacing_do_not_matter() {
        let style = "FONT-FAMILY: Times New Roman;font-size: 22pt;margin-bottom:0pt;margin-top:6pt;";
        assert_eq!(extract(&[para(Some(style), "Alpha Corp")]), "Alpha Corp");
    }

    #[test]
    fn different_or_extra_declarations_do_not_match() {
        let ps = vec![
            para(Some("margin-top:6pt; margin-bottom:0pt; font-size:24pt; font-family:Times New Roman"), "A"),
            para(Some(&format!("{STYLE}; color:red")), "B"),
            para(None, "C"),
        ];
        assert_eq!(extract(&ps), "");
    }

    #[test]
    fn no_paragraphs_is_empty() {
        assert_eq!(extract(&[]), "");
    }
}
