const BLANK_CHECK_MARKER: &[u8] = b"blank check company";

/// Does the document disclose a blank-check company? Case-sensitive byte
/// containment, no normalization.
pub fn is_blank_check(content: &[u8]) -> bool {
    content
        .windows(BLANK_CHECK_MARKER.len())
        .any(|window| window == BLANK_CHECK_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_anywhere_classifies_true() {
        assert!(is_blank_check(b"blank check company"));
        assert!(is_blank_check(
            b"<p>We are a newly incorporated blank check company formed in Delaware.</p>"
        ));
    }

    #[test]
    fn near_misses_classify_false() {
        assert!(!is_blank_check(b""));
        assert!(!is_blank_check(b"Blank Check Company"));
        assert!(!is_blank_check(b"blank-check company"));
        assert!(!is_blank_check(b"blank check\ncompany"));
        assert!(!is_blank_check(b"blank check compan"));
    }
}
