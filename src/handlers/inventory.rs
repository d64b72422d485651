use crate::{
    auth::{permissions as perm, AuthRouterExt},
    errors::ServiceError,
    handlers::AppState,
    services::inventory::StockAdjustment,
    ApiResponse,
};
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Either `{"set": n}` for a stocktake or `{"delta": n}` for a movement.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AdjustStockRequest {
    pub set: Option<i32>,
    pub delta: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory",
    responses((status = 200, description = "Stock levels for every part")),
    tag = "inventory"
)]
pub async fn stock_levels(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let levels = state.services.inventory.stock_levels().await?;
    Ok(Json(ApiResponse::success(levels)))
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory/low-stock",
    responses((status = 200, description = "Parts at or below minimum quantity, worst first")),
    tag = "inventory"
)]
pub async fn low_stock(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let levels = state.services.inventory.low_stock().await?;
    Ok(Json(ApiResponse::success(levels)))
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory/out-of-stock",
    responses((status = 200, description = "Parts with nothing on hand")),
    tag = "inventory"
)]
pub async fn out_of_stock(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let levels = state.services.inventory.out_of_stock().await?;
    Ok(Json(ApiResponse::success(levels)))
}

#[utoipa::path(
    post,
    path = "/api/v1/inventory/{part_id}/adjust",
    params(("part_id" = Uuid, Path, description = "Part id")),
    request_body = AdjustStockRequest,
    responses(
        (status = 200, description = "Stock adjusted"),
        (status = 400, description = "Neither or both of set/delta given", body = crate::errors::ErrorResponse),
        (status = 422, description = "Would take stock negative", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn adjust_stock(
    State(state): State<AppState>,
    Path(part_id): Path<Uuid>,
    Json(request): Json<AdjustStockRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let adjustment = match (request.set, request.delta) {
        (Some(count), None) => StockAdjustment::Absolute(count),
        (None, Some(delta)) => StockAdjustment::Delta(delta),
        _ => {
            return Err(ServiceError::InvalidInput(
                "Provide exactly one of `set` or `delta`".into(),
            ))
        }
    };
    let level = state
        .services
        .inventory
        .adjust_stock(part_id, adjustment)
        .await?;
    Ok(Json(ApiResponse::success(level)))
}

pub fn inventory_routes() -> Router<AppState> {
    let read = Router::new()
        .route("/", get(stock_levels))
        .route("/low-stock", get(low_stock))
        .route("/out-of-stock", get(out_of_stock))
        .with_permission(perm::INVENTORY_READ);

    let write = Router::new()
        .route("/:part_id/adjust", post(adjust_stock))
        .with_permission(perm::INVENTORY_WRITE);

    read.merge(write)
}
