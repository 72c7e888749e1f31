//! Parsing and formatting of generated narrative text.
//!
//! The narrative generation service returns one free-text block containing up
//! to four markdown-style sections. [`parse`] splits that block into the four
//! named sections; [`format_for_display`] and [`format_for_email`] normalise a
//! section's punctuation for the screen/document and plain-text email surfaces
//! respectively. All functions here are pure: malformed or missing text never
//! fails, it just produces empty sections.

/// The four narrative sections recovered from generated text.
///
/// An empty string means the section was absent; there is no null/absent
/// distinction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSections {
    pub executive_summary: String,
    pub highlights: String,
    pub challenges: String,
    pub asks: String,
}

/// Splits raw narrative text into its named sections.
///
/// The text is split at lines beginning with `## `. For each chunk the first
/// line is treated as the header and classified by case-insensitive substring
/// match; the remaining lines become the section content, trimmed. Chunks with
/// an unrecognised header are silently discarded.
pub fn parse(raw: &str) -> ParsedSections {
    let mut sections = ParsedSections::default();
    if raw.trim().is_empty() {
        return sections;
    }

    for chunk in split_at_headers(raw) {
        let mut lines = chunk.trim().lines();
        let header = match lines.next() {
            Some(line) => line.to_lowercase(),
            None => continue,
        };
        let content = lines.collect::<Vec<_>>().join("\n").trim().to_string();

        if header.contains("executive summary") {
            sections.executive_summary = content;
        } else if header.contains("highlights") {
            sections.highlights = content;
        } else if header.contains("challenges") {
            sections.challenges = content;
        } else if header.contains("how you can help") {
            sections.asks = content;
        }
    }

    sections
}

/// Splits text into chunks, each starting at a line that begins with `## `.
/// Text before the first header forms its own chunk.
fn split_at_headers(raw: &str) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in raw.lines() {
        if line.starts_with("## ") && !current.trim().is_empty() {
            chunks.push(std::mem::take(&mut current));
        }
        current.push_str(line);
        current.push('\n');
    }
    if !current.trim().is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Normalises a section's text for on-screen or document display.
///
/// Line-start `- ` bullets become the canonical `• ` glyph and `**bold**` /
/// `*italic*` emphasis markers are stripped, keeping the enclosed text.
pub fn format_for_display(content: &str) -> String {
    let bulleted = normalise_bullets(content);
    let stripped = strip_delimited(&strip_delimited(&bulleted, "**"), "*");
    stripped.trim().to_string()
}

/// Normalises a section's text for a plain-text email body.
///
/// This is a stricter pass than [`format_for_display`]: on top of bullet
/// normalisation and emphasis stripping it removes `## `/`### ` header markers
/// line by line and collapses runs of three or more newlines to exactly two.
/// It is a distinct function, not a flag: email output must be plain text,
/// while display output tolerates residual markup.
pub fn format_for_email(content: &str) -> String {
    let without_headers = content
        .lines()
        .map(|line| {
            line.strip_prefix("### ")
                .or_else(|| line.strip_prefix("## "))
                .unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let bulleted = normalise_bullets(&without_headers);
    let stripped = strip_delimited(&strip_delimited(&bulleted, "**"), "*");
    collapse_blank_runs(&stripped).trim().to_string()
}

/// Converts `- ` bullets to the canonical `•` glyph. A dash counts as a
/// bullet marker at line start or when preceded by whitespace.
fn normalise_bullets(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            let line = match line.strip_prefix("- ") {
                Some(rest) => format!("\u{2022} {}", rest),
                None => line.to_string(),
            };
            line.replace(" - ", " \u{2022} ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Removes paired occurrences of `delim`, keeping the enclosed text.
/// An unpaired trailing delimiter is left untouched.
fn strip_delimited(input: &str, delim: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(delim) {
        let after_open = start + delim.len();
        match rest[after_open..].find(delim) {
            Some(inner_len) => {
                out.push_str(&rest[..start]);
                out.push_str(&rest[after_open..after_open + inner_len]);
                rest = &rest[after_open + inner_len + delim.len()..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

fn collapse_blank_runs(input: &str) -> String {
    let mut out = input.to_string();
    while out.contains("\n\n\n") {
        out = out.replace("\n\n\n", "\n\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_NARRATIVE: &str = "## Executive Summary\nStrong quarter with 23% growth.\n\n## Key Highlights\n\u{2022} Launched enterprise tier\n\u{2022} Hired VP of Engineering\n\n## Current Challenges & Mitigation\nSales cycles lengthened; focusing on enterprise deals.\n\n## How You Can Help\n\u{2022} Intros to fintech prospects\n";

    #[test]
    fn test_parse_recovers_all_four_sections() {
        let sections = parse(FULL_NARRATIVE);
        assert_eq!(
            sections.executive_summary,
            "Strong quarter with 23% growth."
        );
        assert!(sections.highlights.starts_with("\u{2022} Launched"));
        assert_eq!(
            sections.challenges,
            "Sales cycles lengthened; focusing on enterprise deals."
        );
        assert_eq!(sections.asks, "\u{2022} Intros to fintech prospects");
    }

    #[test]
    fn test_parse_is_order_independent() {
        let sections = parse("## Highlights\nA\n## Executive Summary\nB");
        assert_eq!(sections.highlights, "A");
        assert_eq!(sections.executive_summary, "B");
    }

    #[test]
    fn test_parse_empty_input_yields_empty_sections() {
        assert_eq!(parse(""), ParsedSections::default());
        assert_eq!(parse("  \n \n"), ParsedSections::default());
    }

    #[test]
    fn test_parse_subset_and_unknown_headers() {
        let sections = parse("## Roadmap\nIgnored\n## Challenges\nTough month");
        assert_eq!(sections.challenges, "Tough month");
        assert!(sections.executive_summary.is_empty());
        assert!(sections.highlights.is_empty());
        assert!(sections.asks.is_empty());
    }

    #[test]
    fn test_parse_header_match_is_case_insensitive() {
        let sections = parse("## EXECUTIVE SUMMARY\nAll caps still works");
        assert_eq!(sections.executive_summary, "All caps still works");
    }

    #[test]
    fn test_parse_preamble_without_header_is_discarded() {
        let sections = parse("Some intro prose.\n## Executive Summary\nBody");
        assert_eq!(sections.executive_summary, "Body");
    }

    #[test]
    fn test_parse_content_runs_to_next_header_or_end() {
        let sections = parse("## Executive Summary\nLine one\nLine two\n## Highlights\nH");
        assert_eq!(sections.executive_summary, "Line one\nLine two");
        assert_eq!(sections.highlights, "H");
    }

    #[test]
    fn test_format_for_display_strips_emphasis_and_normalises_bullets() {
        assert_eq!(
            format_for_display("**Bold** and *italic* and - dash"),
            "Bold and italic and \u{2022} dash"
        );
    }

    #[test]
    fn test_format_for_display_leaves_unpaired_asterisk() {
        assert_eq!(format_for_display("5 * 3"), "5 * 3");
    }

    #[test]
    fn test_format_for_display_converts_mid_line_dash_bullet() {
        assert_eq!(
            format_for_display("first \u{2022} point - second point"),
            "first \u{2022} point \u{2022} second point"
        );
    }

    #[test]
    fn test_format_for_display_keeps_canonical_bullets() {
        assert_eq!(
            format_for_display("\u{2022} already canonical\n- needs converting"),
            "\u{2022} already canonical\n\u{2022} needs converting"
        );
    }

    #[test]
    fn test_format_for_email_strips_headers_and_collapses_newlines() {
        let input = "## Key Highlights\n\u{2022} **Big** win\n\n\n\n### Detail\ndone";
        assert_eq!(
            format_for_email(input),
            "Key Highlights\n\u{2022} Big win\n\nDetail\ndone"
        );
    }

    #[test]
    fn test_format_for_email_differs_from_display_on_headers() {
        let input = "## Heading\nbody";
        assert_eq!(format_for_display(input), "## Heading\nbody");
        assert_eq!(format_for_email(input), "Heading\nbody");
    }
}
