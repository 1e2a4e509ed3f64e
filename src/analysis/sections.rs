//! Markdown section extraction
//!
//! Splits document text into normalized header + leading-context tokens.
//! The analyzer and the maturity scorer both consume this list; callers
//! extract once and pass the same list to both so they see an identical
//! view of the document.

/// Extract markdown section headers and their leading context.
///
/// For every line whose trimmed form starts with `#`, emits the header
/// text with leading `#`s and whitespace stripped, lowercased. If the
/// next line is non-blank, it is also emitted, trimmed and lowercased.
///
/// Pure function; output order follows document order.
pub fn extract_sections(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    let mut sections = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let stripped = line.trim();
        if !stripped.starts_with('#') {
            continue;
        }

        let header = stripped.trim_start_matches('#').trim().to_lowercase();
        sections.push(header);

        // First line of the section body gives matching context
        if let Some(next) = lines.get(i + 1) {
            let next = next.trim();
            if !next.is_empty() {
                sections.push(next.to_lowercase());
            }
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_headers_yields_empty() {
        assert!(extract_sections("plain prose\nwith no markdown headers").is_empty());
        assert!(extract_sections("").is_empty());
    }

    #[test]
    fn test_header_is_stripped_and_lowercased() {
        let sections = extract_sections("## Error Handling");
        assert_eq!(sections, vec!["error handling"]);
    }

    #[test]
    fn test_context_line_included_when_non_blank() {
        let sections = extract_sections("# Goals\nShip the Widget API by Q3.");
        assert_eq!(sections, vec!["goals", "ship the widget api by q3."]);
    }

    #[test]
    fn test_blank_line_after_header_skipped() {
        let sections = extract_sections("# Goals\n\nBody paragraph.");
        assert_eq!(sections, vec!["goals"]);
    }

    #[test]
    fn test_indented_header_recognized() {
        let sections = extract_sections("   ## Rollout Plan\n   Phase one.");
        assert_eq!(sections, vec!["rollout plan", "phase one."]);
    }

    #[test]
    fn test_order_preserved() {
        let text = "# First\n\n## Second\ncontext\n### Third\n";
        let sections = extract_sections(text);
        assert_eq!(sections, vec!["first", "second", "context", "third"]);
    }

    #[test]
    fn test_consecutive_headers() {
        // A header directly followed by another header emits the second
        // header both as context and as its own entry.
        let sections = extract_sections("# A\n## B\nbody");
        assert_eq!(sections, vec!["a", "## b", "b", "body"]);
    }
}
