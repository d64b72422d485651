use crate::{
    auth::{permissions as perm, AuthRouterExt},
    errors::ServiceError,
    handlers::AppState,
    services::inspections::{CreateTemplateRequest, UpdateChecklistItemRequest},
    ApiResponse,
};
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TemplateListParams {
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StartInspectionRequest {
    pub template_id: Uuid,
    pub inspector_id: Option<Uuid>,
}

#[utoipa::path(
    post,
    path = "/api/v1/inspection-templates",
    request_body = CreateTemplateRequest,
    responses((status = 201, description = "Template created with its checklist items")),
    tag = "inspections"
)]
pub async fn create_template(
    State(state): State<AppState>,
    Json(request): Json<CreateTemplateRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let template = state.services.inspections.create_template(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(template))))
}

#[utoipa::path(
    get,
    path = "/api/v1/inspection-templates",
    params(TemplateListParams),
    responses((status = 200, description = "List inspection templates")),
    tag = "inspections"
)]
pub async fn list_templates(
    State(state): State<AppState>,
    Query(params): Query<TemplateListParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let templates = state
        .services
        .inspections
        .list_templates(params.include_inactive)
        .await?;
    Ok(Json(ApiResponse::success(templates)))
}

#[utoipa::path(
    get,
    path = "/api/v1/inspection-templates/{id}",
    params(("id" = Uuid, Path, description = "Template id")),
    responses((status = 200, description = "Template with its checklist items")),
    tag = "inspections"
)]
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let template = state.services.inspections.get_template(id).await?;
    Ok(Json(ApiResponse::success(template)))
}

#[utoipa::path(
    get,
    path = "/api/v1/inspection-templates/{id}/items",
    params(("id" = Uuid, Path, description = "Template id")),
    responses((status = 200, description = "Template checklist items in order")),
    tag = "inspections"
)]
pub async fn template_items(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let items = state.services.inspections.template_items(id).await?;
    Ok(Json(ApiResponse::success(items)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/inspection-templates/{id}",
    params(("id" = Uuid, Path, description = "Template id")),
    responses((status = 204, description = "Template retired")),
    tag = "inspections"
)]
pub async fn deactivate_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.inspections.deactivate_template(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/work-orders/{id}/inspections",
    params(("id" = Uuid, Path, description = "Work order id")),
    request_body = StartInspectionRequest,
    responses(
        (status = 201, description = "Inspection started from template"),
        (status = 404, description = "Work order or template not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Template inactive", body = crate::errors::ErrorResponse)
    ),
    tag = "inspections"
)]
pub async fn start_inspection(
    State(state): State<AppState>,
    Path(work_order_id): Path<Uuid>,
    Json(request): Json<StartInspectionRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let inspection = state
        .services
        .inspections
        .start_inspection(work_order_id, request.template_id, request.inspector_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(inspection))))
}

#[utoipa::path(
    get,
    path = "/api/v1/work-orders/{id}/inspections",
    params(("id" = Uuid, Path, description = "Work order id")),
    responses((status = 200, description = "Inspections for the work order")),
    tag = "inspections"
)]
pub async fn list_inspections(
    State(state): State<AppState>,
    Path(work_order_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let inspections = state
        .services
        .inspections
        .list_for_work_order(work_order_id)
        .await?;
    Ok(Json(ApiResponse::success(inspections)))
}

#[utoipa::path(
    get,
    path = "/api/v1/inspections/{id}",
    params(("id" = Uuid, Path, description = "Inspection id")),
    responses((status = 200, description = "Inspection with items and summary")),
    tag = "inspections"
)]
pub async fn get_inspection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let inspection = state.services.inspections.get_inspection(id).await?;
    Ok(Json(ApiResponse::success(inspection)))
}

#[utoipa::path(
    put,
    path = "/api/v1/inspections/{id}/items/{item_id}",
    params(
        ("id" = Uuid, Path, description = "Inspection id"),
        ("item_id" = Uuid, Path, description = "Checklist item id")
    ),
    request_body = UpdateChecklistItemRequest,
    responses((status = 200, description = "Refreshed inspection with recomputed summary")),
    tag = "inspections"
)]
pub async fn update_checklist_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateChecklistItemRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let inspection = state
        .services
        .inspections
        .update_item(id, item_id, request)
        .await?;
    Ok(Json(ApiResponse::success(inspection)))
}

/// Routes mounted under `/inspection-templates`.
pub fn templates_routes() -> Router<AppState> {
    let read = Router::new()
        .route("/", get(list_templates))
        .route("/:id", get(get_template))
        .route("/:id/items", get(template_items))
        .with_permission(perm::INSPECTIONS_READ);
    let write = Router::new()
        .route("/", post(create_template))
        .route("/:id", delete(deactivate_template))
        .with_permission(perm::INSPECTIONS_WRITE);
    read.merge(write)
}

/// Routes mounted under `/work-orders` (per-order inspection collection).
pub fn work_order_inspections_routes() -> Router<AppState> {
    let read = Router::new()
        .route("/:id/inspections", get(list_inspections))
        .with_permission(perm::INSPECTIONS_READ);
    let write = Router::new()
        .route("/:id/inspections", post(start_inspection))
        .with_permission(perm::INSPECTIONS_WRITE);
    read.merge(write)
}

/// Routes mounted under `/inspections`.
pub fn inspections_routes() -> Router<AppState> {
    let read = Router::new()
        .route("/:id", get(get_inspection))
        .with_permission(perm::INSPECTIONS_READ);
    let write = Router::new()
        .route("/:id/items/:item_id", put(update_checklist_item))
        .with_permission(perm::INSPECTIONS_WRITE);
    read.merge(write)
}
