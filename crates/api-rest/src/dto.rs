//! Request and response shapes for the REST API.
//!
//! The core types stay free of OpenAPI concerns; every payload crossing the
//! HTTP boundary has an explicit DTO here with a `ToSchema` derive.

use brief_core::charts::{
    BurnRatePoint, ChartSeries, GrowthTrajectoryPoint, MetricsComparisonPoint, RevenueTrendPoint,
};
use brief_core::export::{AssembledUpdate, MetricTile, SectionBlock};
use brief_core::{UpdateDraft, UpdatePatch, UpdateRecord, UpdateStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpdateStatusDto {
    Draft,
    Sent,
    Archived,
}

impl From<UpdateStatus> for UpdateStatusDto {
    fn from(status: UpdateStatus) -> Self {
        match status {
            UpdateStatus::Draft => Self::Draft,
            UpdateStatus::Sent => Self::Sent,
            UpdateStatus::Archived => Self::Archived,
        }
    }
}

impl From<UpdateStatusDto> for UpdateStatus {
    fn from(status: UpdateStatusDto) -> Self {
        match status {
            UpdateStatusDto::Draft => Self::Draft,
            UpdateStatusDto::Sent => Self::Sent,
            UpdateStatusDto::Archived => Self::Archived,
        }
    }
}

/// Body for `POST /updates`. A missing title gets a quarter-based default.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateUpdateReq {
    pub title: Option<String>,
    pub revenue: Option<String>,
    pub burn_rate: Option<String>,
    pub runway: Option<String>,
    pub growth: Option<String>,
    pub highlights: Option<String>,
    pub challenges: Option<String>,
    pub asks: Option<String>,
}

impl From<CreateUpdateReq> for UpdateDraft {
    fn from(req: CreateUpdateReq) -> Self {
        Self {
            title: req.title,
            revenue: req.revenue,
            burn_rate: req.burn_rate,
            runway: req.runway,
            growth: req.growth,
            highlights: req.highlights,
            challenges: req.challenges,
            asks: req.asks,
        }
    }
}

/// Body for `PUT /updates/{id}`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUpdateReq {
    pub title: Option<String>,
    pub revenue: Option<String>,
    pub burn_rate: Option<String>,
    pub runway: Option<String>,
    pub growth: Option<String>,
    pub highlights: Option<String>,
    pub challenges: Option<String>,
    pub asks: Option<String>,
    pub narrative_text: Option<String>,
    pub status: Option<UpdateStatusDto>,
}

impl From<UpdateUpdateReq> for UpdatePatch {
    fn from(req: UpdateUpdateReq) -> Self {
        Self {
            title: req.title,
            revenue: req.revenue,
            burn_rate: req.burn_rate,
            runway: req.runway,
            growth: req.growth,
            highlights: req.highlights,
            challenges: req.challenges,
            asks: req.asks,
            narrative_text: req.narrative_text,
            status: req.status.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateRes {
    pub id: String,
    pub title: String,
    pub revenue: Option<String>,
    pub burn_rate: Option<String>,
    pub runway: Option<String>,
    pub growth: Option<String>,
    pub highlights: Option<String>,
    pub challenges: Option<String>,
    pub asks: Option<String>,
    pub narrative_text: Option<String>,
    pub created_at: String,
    pub status: UpdateStatusDto,
}

impl From<UpdateRecord> for UpdateRes {
    fn from(record: UpdateRecord) -> Self {
        Self {
            id: record.id.to_string(),
            title: record.title,
            revenue: record.revenue,
            burn_rate: record.burn_rate,
            runway: record.runway,
            growth: record.growth,
            highlights: record.highlights,
            challenges: record.challenges,
            asks: record.asks,
            narrative_text: record.narrative_text,
            created_at: record.created_at.to_rfc3339(),
            status: record.status.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListUpdatesRes {
    pub updates: Vec<UpdateRes>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateSummaryRes {
    pub update: UpdateRes,
    pub narrative_text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MetricTileRes {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SectionRes {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssembledUpdateRes {
    pub title: String,
    pub generated_at: String,
    pub tiles: Vec<MetricTileRes>,
    pub sections: Vec<SectionRes>,
}

impl From<AssembledUpdate> for AssembledUpdateRes {
    fn from(view: AssembledUpdate) -> Self {
        Self {
            title: view.title,
            generated_at: view.generated_at.to_rfc3339(),
            tiles: view.tiles.into_iter().map(MetricTileRes::from).collect(),
            sections: view.sections.into_iter().map(SectionRes::from).collect(),
        }
    }
}

impl From<MetricTile> for MetricTileRes {
    fn from(tile: MetricTile) -> Self {
        Self {
            label: tile.label,
            value: tile.value,
        }
    }
}

impl From<SectionBlock> for SectionRes {
    fn from(section: SectionBlock) -> Self {
        Self {
            heading: section.heading,
            body: section.body,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RevenueTrendPointRes {
    pub month: String,
    pub revenue: f64,
    pub growth: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BurnRatePointRes {
    pub month: String,
    pub burn_rate: f64,
    pub runway: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GrowthTrajectoryPointRes {
    pub month: String,
    pub growth: f64,
    pub target: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MetricsComparisonPointRes {
    pub metric: String,
    pub current: f64,
    pub previous: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChartSeriesRes {
    pub revenue_trend: Vec<RevenueTrendPointRes>,
    pub burn_rate: Vec<BurnRatePointRes>,
    pub growth_trajectory: Vec<GrowthTrajectoryPointRes>,
    pub metrics_comparison: Vec<MetricsComparisonPointRes>,
}

impl From<ChartSeries> for ChartSeriesRes {
    fn from(series: ChartSeries) -> Self {
        Self {
            revenue_trend: series
                .revenue_trend
                .into_iter()
                .map(|p: RevenueTrendPoint| RevenueTrendPointRes {
                    month: p.month,
                    revenue: p.revenue,
                    growth: p.growth,
                })
                .collect(),
            burn_rate: series
                .burn_rate
                .into_iter()
                .map(|p: BurnRatePoint| BurnRatePointRes {
                    month: p.month,
                    burn_rate: p.burn_rate,
                    runway: p.runway,
                })
                .collect(),
            growth_trajectory: series
                .growth_trajectory
                .into_iter()
                .map(|p: GrowthTrajectoryPoint| GrowthTrajectoryPointRes {
                    month: p.month,
                    growth: p.growth,
                    target: p.target,
                })
                .collect(),
            metrics_comparison: series
                .metrics_comparison
                .into_iter()
                .map(|p: MetricsComparisonPoint| MetricsComparisonPointRes {
                    metric: p.metric,
                    current: p.current,
                    previous: p.previous,
                })
                .collect(),
        }
    }
}

/// Screen-renderable view of an update: the assembled sections plus the
/// derived chart series.
#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateViewRes {
    pub update: AssembledUpdateRes,
    pub charts: ChartSeriesRes,
}
