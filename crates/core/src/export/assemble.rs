//! Assembly of an update record into the shared export view.

use crate::narrative::{self, ParsedSections};
use crate::update::UpdateRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Canonical section headings, in the fixed output order.
pub const SECTION_HEADINGS: [&str; 4] = [
    "Executive Summary",
    "Key Highlights",
    "Challenges & Mitigation",
    "How You Can Help",
];

/// One metric tile. Absent metrics carry a neutral placeholder value, never
/// an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricTile {
    pub label: String,
    pub value: String,
}

/// One present text section, display-formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionBlock {
    pub heading: String,
    pub body: String,
}

/// The medium-independent view of an update: everything the email, PDF and
/// screen surfaces need, already filtered and ordered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssembledUpdate {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub tiles: Vec<MetricTile>,
    pub sections: Vec<SectionBlock>,
}

/// Builds the shared export view from a record.
///
/// Sections prefer parsed-narrative content over the raw authored field; the
/// executive summary falls back to the whole narrative text when no header
/// matched. A section empty in both sources is omitted entirely.
pub fn assemble(record: &UpdateRecord) -> AssembledUpdate {
    let narrative_text = record.narrative_text.as_deref().unwrap_or("");
    let parsed: ParsedSections = narrative::parse(narrative_text);

    let candidates = [
        (SECTION_HEADINGS[0], &parsed.executive_summary, narrative_text),
        (
            SECTION_HEADINGS[1],
            &parsed.highlights,
            record.highlights.as_deref().unwrap_or(""),
        ),
        (
            SECTION_HEADINGS[2],
            &parsed.challenges,
            record.challenges.as_deref().unwrap_or(""),
        ),
        (
            SECTION_HEADINGS[3],
            &parsed.asks,
            record.asks.as_deref().unwrap_or(""),
        ),
    ];

    let sections = candidates
        .into_iter()
        .filter_map(|(heading, parsed_body, raw_body)| {
            let chosen = if parsed_body.trim().is_empty() {
                raw_body
            } else {
                parsed_body
            };
            let body = narrative::format_for_display(chosen);
            if body.is_empty() {
                None
            } else {
                Some(SectionBlock {
                    heading: heading.to_string(),
                    body,
                })
            }
        })
        .collect();

    AssembledUpdate {
        title: record.title.clone(),
        generated_at: record.created_at,
        tiles: metric_tiles(record),
        sections,
    }
}

fn metric_tiles(record: &UpdateRecord) -> Vec<MetricTile> {
    let tile = |label: &str, value: &Option<String>, placeholder: &str| MetricTile {
        label: label.to_string(),
        value: match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => placeholder.to_string(),
        },
    };

    vec![
        tile("Monthly Revenue", &record.revenue, "$0"),
        tile("Growth Rate", &record.growth, "0%"),
        tile("Burn Rate", &record.burn_rate, "$0"),
        tile("Runway", &record.runway, "0mo"),
    ]
}

/// Derives the download base name from a title: every character outside
/// `[a-zA-Z0-9]` removed, lowercased. An all-symbol title falls back to
/// "update".
pub fn download_basename(title: &str) -> String {
    let slug: String = title
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase();
    if slug.is_empty() {
        "update".to_string()
    } else {
        slug
    }
}
