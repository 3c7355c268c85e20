//! Front matter extraction
//!
//! Splits a document into its YAML header and body. A header opens with a
//! `---` line at the very start of the document and closes at the first
//! later `---` line. Both `\n` and `\r\n` line endings are accepted, and the
//! opening and closing boundaries do not have to agree on which one they use.

const OPENINGS: [&str; 2] = ["---\n", "---\r\n"];
const CLOSING_LF: &str = "\n---\n";
const CLOSING_CRLF: &str = "\r\n---\r\n";
const TRAILING: [&str; 2] = ["\r\n---", "\n---"];

/// Split `content` into `(front_matter, body)`.
///
/// `front_matter` is the raw header text between the boundaries, `None` when
/// the document has no well-formed header. Without a closing boundary the
/// whole content, opening line included, is returned as the body.
pub fn split(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = OPENINGS.iter().find_map(|open| content.strip_prefix(*open)) else {
        return (None, content);
    };

    if let Some((header_end, body_start)) = find_closing(rest) {
        return (Some(&rest[..header_end]), &rest[body_start..]);
    }

    // A header-only document may end right after the closing dashes.
    if let Some(header) = TRAILING.iter().find_map(|tail| rest.strip_suffix(*tail)) {
        return (Some(header), "");
    }

    (None, content)
}

/// Whether `content` starts with an opening boundary line.
pub fn has_opening(content: &str) -> bool {
    OPENINGS.iter().any(|open| content.starts_with(*open))
}

/// Locate the first interior closing boundary in `rest`.
///
/// Returns the offset where the header ends and the offset where the body
/// starts. When both line-ending variants occur, the LF variant wins unless
/// the CRLF one starts strictly earlier.
fn find_closing(rest: &str) -> Option<(usize, usize)> {
    let lf = rest.find(CLOSING_LF);
    let crlf = rest.find(CLOSING_CRLF);

    match (lf, crlf) {
        (Some(lf), Some(crlf)) if crlf < lf => Some((crlf, crlf + CLOSING_CRLF.len())),
        (Some(lf), _) => Some((lf, lf + CLOSING_LF.len())),
        (None, Some(crlf)) => Some((crlf, crlf + CLOSING_CRLF.len())),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_front_matter() {
        let (fm, body) = split("---\nprop1: aaa\n---\nbody body\n");
        assert_eq!(fm, Some("prop1: aaa"));
        assert_eq!(body, "body body\n");
    }

    #[test]
    fn test_no_front_matter() {
        let content = "no frontmatter here\njust plain markdown\n";
        assert_eq!(split(content), (None, content));
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(split(""), (None, ""));
    }

    #[test]
    fn test_front_matter_only_without_trailing_newline() {
        assert_eq!(split("---\nkey: val\n---"), (Some("key: val"), ""));
        assert_eq!(split("---\r\nkey: val\r\n---"), (Some("key: val"), ""));
    }

    #[test]
    fn test_crlf_line_endings() {
        let (fm, body) = split("---\r\ntitle: hi\r\n---\r\nbody\r\n");
        assert_eq!(fm, Some("title: hi"));
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_mixed_line_endings() {
        let (fm, body) = split("---\r\ntitle: hi\n---\nbody\n");
        assert_eq!(fm, Some("title: hi"));
        assert_eq!(body, "body\n");

        let (fm, body) = split("---\ntitle: hi\r\n---\r\nbody");
        assert_eq!(fm, Some("title: hi"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_earliest_closing_boundary_wins() {
        let (fm, body) = split("---\r\na: 1\r\n---\r\nb\n---\nc");
        assert_eq!(fm, Some("a: 1"));
        assert_eq!(body, "b\n---\nc");

        let (fm, body) = split("---\na: 1\n---\nb\r\n---\r\nc");
        assert_eq!(fm, Some("a: 1"));
        assert_eq!(body, "b\r\n---\r\nc");
    }

    #[test]
    fn test_boundary_in_body_is_plain_text() {
        let (fm, body) = split("---\na: 1\n---\nintro\n---\nmore\n---\n");
        assert_eq!(fm, Some("a: 1"));
        assert_eq!(body, "intro\n---\nmore\n---\n");
    }

    #[test]
    fn test_unterminated_front_matter_is_body() {
        let content = "---\ntitle: never closed\nstill going\n";
        assert_eq!(split(content), (None, content));

        let content = "---\r\ntitle: x\r\n";
        assert_eq!(split(content), (None, content));
    }

    #[test]
    fn test_opening_must_be_exact() {
        for content in ["----\na: 1\n---\nbody", " ---\na: 1\n---\nbody", "---a\n---\n"] {
            assert_eq!(split(content), (None, content));
        }
    }

    #[test]
    fn test_empty_header_text() {
        let (fm, body) = split("---\n\n---\nbody");
        assert_eq!(fm, Some(""));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_closing_dashes_must_stand_alone() {
        let content = "---\na: 1\n----\nbody";
        assert_eq!(split(content), (None, content));
    }

    #[test]
    fn test_has_opening() {
        assert!(has_opening("---\n"));
        assert!(has_opening("---\r\nx"));
        assert!(!has_opening("---"));
        assert!(!has_opening("text\n---\n"));
    }
}
