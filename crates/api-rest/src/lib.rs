//! REST API for FounderBrief.
//!
//! Exposes CRUD over update records, narrative generation, and the three
//! export surfaces (PDF, email text, screen view) with OpenAPI/Swagger
//! documentation. The router is built here so both the standalone
//! `brief-api-rest` binary and the workspace's main `founderbrief-run`
//! binary can serve it.

pub mod dto;

use axum::{
    extract::{Path as AxumPath, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use brief_core::{
    assemble, download_basename, render_email, render_pdf, ChartSeries, CoreConfig, UpdateError,
    UpdatePatch, UpdateStore,
};
use chrono::Utc;
use narrative_ai::{NarrativeGenerator, NarrativeRequest};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use dto::{
    AssembledUpdateRes, ChartSeriesRes, CreateUpdateReq, GenerateSummaryRes, HealthRes,
    ListUpdatesRes, MessageRes, MetricTileRes, SectionRes, UpdateRes, UpdateStatusDto,
    UpdateUpdateReq, UpdateViewRes,
};

/// Shared state for all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<CoreConfig>,
    pub store: UpdateStore,
    pub generator: Arc<dyn NarrativeGenerator>,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>, generator: Arc<dyn NarrativeGenerator>) -> Self {
        let store = UpdateStore::new(cfg.clone());
        Self {
            cfg,
            store,
            generator,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_updates,
        create_update,
        get_update,
        put_update,
        delete_update,
        generate_summary,
        export_pdf,
        export_email,
        view_update,
    ),
    components(schemas(
        HealthRes,
        ListUpdatesRes,
        CreateUpdateReq,
        UpdateUpdateReq,
        UpdateRes,
        UpdateStatusDto,
        GenerateSummaryRes,
        MessageRes,
        UpdateViewRes,
        AssembledUpdateRes,
        MetricTileRes,
        SectionRes,
        ChartSeriesRes,
        dto::RevenueTrendPointRes,
        dto::BurnRatePointRes,
        dto::GrowthTrajectoryPointRes,
        dto::MetricsComparisonPointRes,
    ))
)]
struct ApiDoc;

/// Builds the full application router, including Swagger UI and permissive
/// CORS, with `state` attached.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/updates", get(list_updates).post(create_update))
        .route(
            "/updates/:id",
            get(get_update).put(put_update).delete(delete_update),
        )
        .route(
            "/updates/:id/generate-summary",
            axum::routing::post(generate_summary),
        )
        .route("/updates/:id/pdf", get(export_pdf))
        .route("/updates/:id/email", get(export_email))
        .route("/updates/:id/view", get(view_update))
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

type HandlerError = (StatusCode, &'static str);

/// Maps a store error to the HTTP response it should produce, logging
/// anything unexpected.
fn store_error(context: &str, e: UpdateError) -> HandlerError {
    match e {
        UpdateError::NotFound(_) => (StatusCode::NOT_FOUND, "Update not found"),
        UpdateError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "Invalid input"),
        other => {
            tracing::error!("{} error: {:?}", context, other);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

fn parse_id(id: &str) -> Result<Uuid, HandlerError> {
    Uuid::parse_str(id).map_err(|_| (StatusCode::BAD_REQUEST, "Invalid update id"))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "FounderBrief REST API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/updates",
    responses(
        (status = 200, description = "All updates, newest first", body = ListUpdatesRes),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn list_updates(
    State(state): State<AppState>,
) -> Result<Json<ListUpdatesRes>, HandlerError> {
    match state.store.list() {
        Ok(records) => Ok(Json(ListUpdatesRes {
            updates: records.into_iter().map(UpdateRes::from).collect(),
        })),
        Err(e) => Err(store_error("List updates", e)),
    }
}

#[utoipa::path(
    post,
    path = "/updates",
    request_body = CreateUpdateReq,
    responses(
        (status = 201, description = "Update created", body = UpdateRes),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn create_update(
    State(state): State<AppState>,
    Json(req): Json<CreateUpdateReq>,
) -> Result<(StatusCode, Json<UpdateRes>), HandlerError> {
    match state.store.create(req.into(), Utc::now()) {
        Ok(record) => Ok((StatusCode::CREATED, Json(record.into()))),
        Err(e) => Err(store_error("Create update", e)),
    }
}

#[utoipa::path(
    get,
    path = "/updates/{id}",
    params(("id" = String, Path, description = "Update identifier")),
    responses(
        (status = 200, description = "The update", body = UpdateRes),
        (status = 400, description = "Invalid update id"),
        (status = 404, description = "Update not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn get_update(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<UpdateRes>, HandlerError> {
    let id = parse_id(&id)?;
    match state.store.get(id) {
        Ok(record) => Ok(Json(record.into())),
        Err(e) => Err(store_error("Get update", e)),
    }
}

#[utoipa::path(
    put,
    path = "/updates/{id}",
    request_body = UpdateUpdateReq,
    params(("id" = String, Path, description = "Update identifier")),
    responses(
        (status = 200, description = "Updated record", body = UpdateRes),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Update not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn put_update(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(req): Json<UpdateUpdateReq>,
) -> Result<Json<UpdateRes>, HandlerError> {
    let id = parse_id(&id)?;
    match state.store.update(id, req.into()) {
        Ok(record) => Ok(Json(record.into())),
        Err(e) => Err(store_error("Put update", e)),
    }
}

#[utoipa::path(
    delete,
    path = "/updates/{id}",
    params(("id" = String, Path, description = "Update identifier")),
    responses(
        (status = 200, description = "Update deleted", body = MessageRes),
        (status = 400, description = "Invalid update id"),
        (status = 404, description = "Update not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn delete_update(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<MessageRes>, HandlerError> {
    let id = parse_id(&id)?;
    match state.store.delete(id) {
        Ok(()) => Ok(Json(MessageRes {
            message: "Update deleted".into(),
        })),
        Err(e) => Err(store_error("Delete update", e)),
    }
}

#[utoipa::path(
    post,
    path = "/updates/{id}/generate-summary",
    params(("id" = String, Path, description = "Update identifier")),
    responses(
        (status = 200, description = "Narrative generated and stored", body = GenerateSummaryRes),
        (status = 400, description = "Invalid update id"),
        (status = 404, description = "Update not found"),
        (status = 502, description = "Narrative generation failed"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn generate_summary(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<GenerateSummaryRes>, HandlerError> {
    let id = parse_id(&id)?;
    let record = state
        .store
        .get(id)
        .map_err(|e| store_error("Generate summary", e))?;

    let request = NarrativeRequest {
        revenue: record.revenue.clone().unwrap_or_default(),
        burn_rate: record.burn_rate.clone().unwrap_or_default(),
        runway: record.runway.clone().unwrap_or_default(),
        growth: record.growth.clone().unwrap_or_default(),
        highlights: record.highlights.clone().unwrap_or_default(),
        challenges: record.challenges.clone().unwrap_or_default(),
        asks: record.asks.clone().unwrap_or_default(),
    };

    let narrative_text = match state.generator.generate(&request).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("Narrative generation error: {:?}", e);
            return Err((StatusCode::BAD_GATEWAY, "Narrative generation failed"));
        }
    };

    let patch = UpdatePatch {
        narrative_text: Some(narrative_text.clone()),
        ..Default::default()
    };
    match state.store.update(id, patch) {
        Ok(record) => Ok(Json(GenerateSummaryRes {
            update: record.into(),
            narrative_text,
        })),
        Err(e) => Err(store_error("Generate summary", e)),
    }
}

#[utoipa::path(
    get,
    path = "/updates/{id}/pdf",
    params(("id" = String, Path, description = "Update identifier")),
    responses(
        (status = 200, description = "PDF document", content_type = "application/pdf"),
        (status = 400, description = "Invalid update id"),
        (status = 404, description = "Update not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn export_pdf(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Response, HandlerError> {
    let id = parse_id(&id)?;
    let record = state
        .store
        .get(id)
        .map_err(|e| store_error("Export PDF", e))?;

    let view = assemble(&record);
    let charts = ChartSeries::for_record(&record, Utc::now(), &mut rand::thread_rng());
    let bytes = render_pdf(&view, &charts);
    let filename = format!("{}.pdf", download_basename(&record.title));

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/updates/{id}/email",
    params(("id" = String, Path, description = "Update identifier")),
    responses(
        (status = 200, description = "Plain-text email body", content_type = "text/plain"),
        (status = 400, description = "Invalid update id"),
        (status = 404, description = "Update not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn export_email(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Response, HandlerError> {
    let id = parse_id(&id)?;
    let record = state
        .store
        .get(id)
        .map_err(|e| store_error("Export email", e))?;

    let body = render_email(&assemble(&record));
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string())],
        body,
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/updates/{id}/view",
    params(("id" = String, Path, description = "Update identifier")),
    responses(
        (status = 200, description = "Screen view with chart series", body = UpdateViewRes),
        (status = 400, description = "Invalid update id"),
        (status = 404, description = "Update not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn view_update(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<UpdateViewRes>, HandlerError> {
    let id = parse_id(&id)?;
    let record = state
        .store
        .get(id)
        .map_err(|e| store_error("View update", e))?;

    let view = assemble(&record);
    let charts = ChartSeries::for_record(&record, Utc::now(), &mut rand::thread_rng());
    Ok(Json(UpdateViewRes {
        update: view.into(),
        charts: charts.into(),
    }))
}
