//! The investor-update entity and its input shapes.

use crate::constants::MAX_TITLE_LEN;
use crate::{UpdateError, UpdateResult};
use brief_types::NonEmptyText;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of an update record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpdateStatus {
    Draft,
    Sent,
    Archived,
}

/// A persisted investor update.
///
/// The scalar metrics are free-form strings on purpose: founders enter values
/// like `"$125,000"`, `"23%"` or `"18 months"` and the system never enforces
/// units. Chart generation extracts indicative numbers from them; everything
/// else renders them verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRecord {
    pub id: Uuid,
    pub title: String,
    pub revenue: Option<String>,
    pub burn_rate: Option<String>,
    pub runway: Option<String>,
    pub growth: Option<String>,
    pub highlights: Option<String>,
    pub challenges: Option<String>,
    pub asks: Option<String>,
    /// Raw output of the narrative generation service, if it has been run.
    pub narrative_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub status: UpdateStatus,
}

/// Caller-supplied fields for creating an update.
#[derive(Debug, Clone, Default)]
pub struct UpdateDraft {
    pub title: Option<String>,
    pub revenue: Option<String>,
    pub burn_rate: Option<String>,
    pub runway: Option<String>,
    pub growth: Option<String>,
    pub highlights: Option<String>,
    pub challenges: Option<String>,
    pub asks: Option<String>,
}

/// Partial patch applied to an existing update. `None` fields are left as-is.
#[derive(Debug, Clone, Default)]
pub struct UpdatePatch {
    pub title: Option<String>,
    pub revenue: Option<String>,
    pub burn_rate: Option<String>,
    pub runway: Option<String>,
    pub growth: Option<String>,
    pub highlights: Option<String>,
    pub challenges: Option<String>,
    pub asks: Option<String>,
    pub narrative_text: Option<String>,
    pub status: Option<UpdateStatus>,
}

impl UpdateRecord {
    /// Builds a new draft record from caller input.
    ///
    /// A missing title defaults to a quarter-based label derived from `now`.
    pub fn from_draft(draft: UpdateDraft, now: DateTime<Utc>) -> UpdateResult<Self> {
        let title = match draft.title {
            Some(title) => validate_title(&title)?,
            None => default_quarter_title(now),
        };

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            revenue: draft.revenue,
            burn_rate: draft.burn_rate,
            runway: draft.runway,
            growth: draft.growth,
            highlights: draft.highlights,
            challenges: draft.challenges,
            asks: draft.asks,
            narrative_text: None,
            created_at: now,
            status: UpdateStatus::Draft,
        })
    }

    /// Applies a partial patch in place.
    pub fn apply(&mut self, patch: UpdatePatch) -> UpdateResult<()> {
        if let Some(title) = patch.title {
            self.title = validate_title(&title)?;
        }
        if let Some(revenue) = patch.revenue {
            self.revenue = Some(revenue);
        }
        if let Some(burn_rate) = patch.burn_rate {
            self.burn_rate = Some(burn_rate);
        }
        if let Some(runway) = patch.runway {
            self.runway = Some(runway);
        }
        if let Some(growth) = patch.growth {
            self.growth = Some(growth);
        }
        if let Some(highlights) = patch.highlights {
            self.highlights = Some(highlights);
        }
        if let Some(challenges) = patch.challenges {
            self.challenges = Some(challenges);
        }
        if let Some(asks) = patch.asks {
            self.asks = Some(asks);
        }
        if let Some(narrative_text) = patch.narrative_text {
            self.narrative_text = Some(narrative_text);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> UpdateResult<String> {
    NonEmptyText::with_max_len(title, MAX_TITLE_LEN)
        .map(NonEmptyText::into_inner)
        .map_err(|e| UpdateError::InvalidInput(format!("title: {}", e)))
}

/// Quarter-based default title, e.g. "Q3 2026 Investor Update".
pub fn default_quarter_title(now: DateTime<Utc>) -> String {
    let quarter = now.month0() / 3 + 1;
    format!("Q{} {} Investor Update", quarter, now.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_quarter_title() {
        let now = Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();
        assert_eq!(default_quarter_title(now), "Q3 2026 Investor Update");
        let jan = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(default_quarter_title(jan), "Q1 2026 Investor Update");
    }

    #[test]
    fn test_from_draft_defaults_title_and_status() {
        let now = Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap();
        let record = UpdateRecord::from_draft(UpdateDraft::default(), now).unwrap();
        assert_eq!(record.title, "Q2 2026 Investor Update");
        assert_eq!(record.status, UpdateStatus::Draft);
        assert!(record.narrative_text.is_none());
    }

    #[test]
    fn test_from_draft_rejects_blank_or_long_title() {
        let now = Utc::now();
        let blank = UpdateDraft {
            title: Some("   ".into()),
            ..Default::default()
        };
        assert!(UpdateRecord::from_draft(blank, now).is_err());

        let long = UpdateDraft {
            title: Some("x".repeat(101)),
            ..Default::default()
        };
        assert!(UpdateRecord::from_draft(long, now).is_err());
    }

    #[test]
    fn test_apply_patch_updates_only_given_fields() {
        let now = Utc::now();
        let draft = UpdateDraft {
            title: Some("April update".into()),
            revenue: Some("$100,000".into()),
            ..Default::default()
        };
        let mut record = UpdateRecord::from_draft(draft, now).unwrap();
        record
            .apply(UpdatePatch {
                growth: Some("23%".into()),
                status: Some(UpdateStatus::Sent),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(record.title, "April update");
        assert_eq!(record.revenue.as_deref(), Some("$100,000"));
        assert_eq!(record.growth.as_deref(), Some("23%"));
        assert_eq!(record.status, UpdateStatus::Sent);
    }

    #[test]
    fn test_status_serializes_upper_snake() {
        let json = serde_json::to_string(&UpdateStatus::Archived).unwrap();
        assert_eq!(json, "\"ARCHIVED\"");
    }
}
