use crate::{
    auth::{permissions as perm, AuthRouterExt},
    errors::ServiceError,
    handlers::AppState,
    services::catalog::{CreatePartRequest, PartFilter, UpdatePartRequest},
    ApiResponse, PaginatedResponse,
};
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PartListParams {
    /// Category filter; accepts display names ("Engine & Fluids") or wire
    /// names ("ENGINE_AND_FLUIDS"), case-insensitive.
    pub category: Option<String>,
    pub search: Option<String>,
    pub vendor_id: Option<Uuid>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[utoipa::path(
    post,
    path = "/api/v1/parts",
    request_body = CreatePartRequest,
    responses(
        (status = 201, description = "Part created"),
        (status = 400, description = "Details tag does not match category", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate part number", body = crate::errors::ErrorResponse)
    ),
    tag = "parts"
)]
pub async fn create_part(
    State(state): State<AppState>,
    Json(request): Json<CreatePartRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let part = state.services.catalog.create_part(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(part))))
}

#[utoipa::path(
    get,
    path = "/api/v1/parts",
    params(PartListParams),
    responses((status = 200, description = "Filtered, paginated parts")),
    tag = "parts"
)]
pub async fn list_parts(
    State(state): State<AppState>,
    Query(params): Query<PartListParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let filter = PartFilter {
        category: params.category,
        search: params.search,
        vendor_id: params.vendor_id,
    };
    let (items, total, total_pages) = state
        .services
        .catalog
        .list_parts(filter, params.page, params.limit)
        .await?;
    let (page, limit) = crate::models::paging::normalize(params.page, params.limit);
    Ok(Json(PaginatedResponse {
        items,
        total,
        page,
        limit,
        total_pages,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/parts/categories",
    responses((status = 200, description = "Category picker data")),
    tag = "parts"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(Json(ApiResponse::success(state.services.catalog.categories())))
}

#[utoipa::path(
    get,
    path = "/api/v1/parts/{id}",
    params(("id" = Uuid, Path, description = "Part id")),
    responses((status = 200, description = "Part detail with derived availability")),
    tag = "parts"
)]
pub async fn get_part(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let part = state.services.catalog.get_part(id).await?;
    Ok(Json(ApiResponse::success(part)))
}

#[utoipa::path(
    put,
    path = "/api/v1/parts/{id}",
    params(("id" = Uuid, Path, description = "Part id")),
    request_body = UpdatePartRequest,
    responses((status = 200, description = "Part updated")),
    tag = "parts"
)]
pub async fn update_part(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePartRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let part = state.services.catalog.update_part(id, request).await?;
    Ok(Json(ApiResponse::success(part)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/parts/{id}",
    params(("id" = Uuid, Path, description = "Part id")),
    responses((status = 204, description = "Part deleted")),
    tag = "parts"
)]
pub async fn delete_part(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.catalog.delete_part(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn parts_routes() -> Router<AppState> {
    let read = Router::new()
        .route("/", get(list_parts))
        .route("/categories", get(list_categories))
        .route("/:id", get(get_part))
        .with_permission(perm::PARTS_READ);

    let write = Router::new()
        .route("/", post(create_part))
        .route("/:id", put(update_part).delete(delete_part))
        .with_permission(perm::PARTS_WRITE);

    read.merge(write)
}
