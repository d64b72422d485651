use crate::{
    auth::{permissions as perm, AuthRouterExt},
    errors::ServiceError,
    handlers::AppState,
    ApiResponse,
};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/v1/work-orders/{id}/estimates",
    params(("id" = Uuid, Path, description = "Work order id")),
    responses(
        (status = 201, description = "Estimate generated from current line items"),
        (status = 409, description = "Work order not in a quotable status", body = crate::errors::ErrorResponse)
    ),
    tag = "estimates"
)]
pub async fn generate_estimate(
    State(state): State<AppState>,
    Path(work_order_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let estimate = state
        .services
        .estimates
        .generate_estimate(work_order_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(estimate))))
}

#[utoipa::path(
    get,
    path = "/api/v1/work-orders/{id}/estimates",
    params(("id" = Uuid, Path, description = "Work order id")),
    responses((status = 200, description = "Estimate versions, newest first")),
    tag = "estimates"
)]
pub async fn list_estimates(
    State(state): State<AppState>,
    Path(work_order_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let estimates = state
        .services
        .estimates
        .list_for_work_order(work_order_id)
        .await?;
    Ok(Json(ApiResponse::success(estimates)))
}

#[utoipa::path(
    get,
    path = "/api/v1/estimates/{id}",
    params(("id" = Uuid, Path, description = "Estimate id")),
    responses((status = 200, description = "Estimate detail")),
    tag = "estimates"
)]
pub async fn get_estimate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let estimate = state.services.estimates.get_estimate(id).await?;
    Ok(Json(ApiResponse::success(estimate)))
}

#[utoipa::path(
    post,
    path = "/api/v1/estimates/{id}/submit",
    params(("id" = Uuid, Path, description = "Estimate id")),
    responses((status = 200, description = "Estimate sent for customer approval")),
    tag = "estimates"
)]
pub async fn submit_estimate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let estimate = state.services.estimates.submit_for_approval(id).await?;
    Ok(Json(ApiResponse::success(estimate)))
}

#[utoipa::path(
    post,
    path = "/api/v1/estimates/{id}/approve",
    params(("id" = Uuid, Path, description = "Estimate id")),
    responses(
        (status = 200, description = "Estimate approved, work order moved into service"),
        (status = 409, description = "Estimate or work order not awaiting approval", body = crate::errors::ErrorResponse)
    ),
    tag = "estimates"
)]
pub async fn approve_estimate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let estimate = state.services.estimates.approve_estimate(id).await?;
    Ok(Json(ApiResponse::success(estimate)))
}

#[utoipa::path(
    post,
    path = "/api/v1/estimates/{id}/reject",
    params(("id" = Uuid, Path, description = "Estimate id")),
    responses((status = 200, description = "Estimate rejected, work order back to estimation")),
    tag = "estimates"
)]
pub async fn reject_estimate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let estimate = state.services.estimates.reject_estimate(id).await?;
    Ok(Json(ApiResponse::success(estimate)))
}

/// Routes mounted under `/work-orders` (per-order estimate collection).
pub fn work_order_estimates_routes() -> Router<AppState> {
    let read = Router::new()
        .route("/:id/estimates", get(list_estimates))
        .with_permission(perm::ESTIMATES_READ);
    let write = Router::new()
        .route("/:id/estimates", post(generate_estimate))
        .with_permission(perm::ESTIMATES_WRITE);
    read.merge(write)
}

/// Routes mounted under `/estimates`.
pub fn estimates_routes() -> Router<AppState> {
    let read = Router::new()
        .route("/:id", get(get_estimate))
        .with_permission(perm::ESTIMATES_READ);
    let write = Router::new()
        .route("/:id/submit", post(submit_estimate))
        .route("/:id/approve", post(approve_estimate))
        .route("/:id/reject", post(reject_estimate))
        .with_permission(perm::ESTIMATES_WRITE);
    read.merge(write)
}
