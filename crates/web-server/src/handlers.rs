use crate::view::{DashboardPayload, DashboardView};
use crate::{error::AppError, render, AppState};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::NaiveDate;
use configuration::AnalyticsSettings;
use core_types::parse_reference_date;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// `YYYY-MM-DD`; absent or blank means today in the configured timezone.
    #[serde(rename = "ref")]
    pub reference: Option<String>,
}

/// # GET /
/// The dashboard page. A sheet that cannot be loaded still renders a page,
/// showing the error next to the reference date.
pub async fn dashboard_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, AppError> {
    let reference_date = resolve_reference_date(&query, &state.settings)?;
    let payload = build_payload(&state, reference_date).await?;
    Ok(Html(render::render_dashboard(&state.title, &payload)))
}

/// # GET /api/dashboard
/// The same payload as JSON. A sheet that cannot be loaded answers 502 with
/// the error bundle.
pub async fn dashboard_json(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<(StatusCode, Json<DashboardPayload>), AppError> {
    let reference_date = resolve_reference_date(&query, &state.settings)?;
    let payload = build_payload(&state, reference_date).await?;
    let status = match payload {
        DashboardPayload::Ok(_) => StatusCode::OK,
        DashboardPayload::Error(_) => StatusCode::BAD_GATEWAY,
    };
    Ok((status, Json(payload)))
}

/// # GET /api/health
pub async fn health() -> &'static str {
    "OK"
}

/// Parses `?ref=`, falling back to today in the configured timezone.
pub fn resolve_reference_date(
    query: &DashboardQuery,
    settings: &AnalyticsSettings,
) -> Result<NaiveDate, AppError> {
    match query.reference.as_deref().filter(|raw| !raw.trim().is_empty()) {
        Some(raw) => Ok(parse_reference_date(raw)?),
        None => Ok(settings.today()),
    }
}

/// One full fetch-and-recompute cycle.
pub async fn build_payload(
    state: &AppState,
    reference_date: NaiveDate,
) -> Result<DashboardPayload, AppError> {
    let ledger = match state.loader.load().await {
        Ok(ledger) => ledger,
        Err(err) => {
            tracing::error!(error = %err, reference_date = %reference_date, "Failed to load sales ledger.");
            return Ok(DashboardPayload::load_failure(&err, reference_date));
        }
    };

    let report = state.engine.analyze(&ledger, reference_date)?;
    Ok(DashboardPayload::Ok(DashboardView::from_report(&report)))
}
