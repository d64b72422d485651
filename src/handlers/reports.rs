use crate::{
    auth::{permissions as perm, AuthRouterExt},
    errors::ServiceError,
    handlers::AppState,
    ApiResponse,
};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RevenueParams {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/revenue",
    params(RevenueParams),
    responses((status = 200, description = "Revenue and commission over the window")),
    tag = "reports"
)]
pub async fn revenue(
    State(state): State<AppState>,
    Query(params): Query<RevenueParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let report = state
        .services
        .reports
        .revenue(params.from, params.to)
        .await?;
    Ok(Json(ApiResponse::success(report)))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/dashboard",
    responses((status = 200, description = "Headline numbers for the dashboard")),
    tag = "reports"
)]
pub async fn dashboard(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let summary = state.services.reports.dashboard_summary().await?;
    Ok(Json(ApiResponse::success(summary)))
}

pub fn reports_routes() -> Router<AppState> {
    Router::new()
        .route("/revenue", get(revenue))
        .route("/dashboard", get(dashboard))
        .with_permission(perm::REPORTS_READ)
}
