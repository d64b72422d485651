use crate::{
    auth::{permissions as perm, AuthRouterExt},
    commands::work_orders::CreateWorkOrderCommand,
    errors::ServiceError,
    handlers::AppState,
    models::{JobType, WorkOrderPriority, WorkOrderStatus},
    services::work_orders::{
        AddAttachmentRequest, AddLaborRequest, AddPartLineRequest, AddPaymentRequest,
        AddQcCheckRequest, AddServiceLineRequest, UpdateWorkOrderRequest, WorkOrderFilter,
    },
    ApiResponse, PaginatedResponse,
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
pub struct WorkOrderListParams {
    pub status: Option<WorkOrderStatus>,
    pub job_type: Option<JobType>,
    pub priority: Option<WorkOrderPriority>,
    pub technician_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusChangeRequest {
    pub status: WorkOrderStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignRequest {
    pub technician_id: Option<Uuid>,
    pub service_advisor_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CancelRequest {
    pub reason: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/work-orders",
    request_body = CreateWorkOrderCommand,
    responses(
        (status = 201, description = "Work order created"),
        (status = 400, description = "Validation failed", body = crate::errors::ErrorResponse)
    ),
    tag = "work-orders"
)]
pub async fn create_work_order(
    State(state): State<AppState>,
    Json(command): Json<CreateWorkOrderCommand>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.work_orders.create_work_order(command).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

#[utoipa::path(
    get,
    path = "/api/v1/work-orders",
    params(WorkOrderListParams),
    responses((status = 200, description = "List work orders")),
    tag = "work-orders"
)]
pub async fn list_work_orders(
    State(state): State<AppState>,
    Query(params): Query<WorkOrderListParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let filter = WorkOrderFilter {
        status: params.status,
        job_type: params.job_type,
        priority: params.priority,
        technician_id: params.technician_id,
        customer_id: params.customer_id,
        search: params.search,
    };
    let (items, total, total_pages) = state
        .services
        .work_orders
        .list_work_orders(filter, params.page, params.limit)
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
    path = "/api/v1/work-orders/board",
    responses((status = 200, description = "Kanban board columns")),
    tag = "work-orders"
)]
pub async fn get_board(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let columns = state.services.work_orders.board().await?;
    Ok(Json(ApiResponse::success(columns)))
}

#[utoipa::path(
    get,
    path = "/api/v1/work-orders/{id}",
    params(("id" = Uuid, Path, description = "Work order id")),
    responses(
        (status = 200, description = "Work order detail"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "work-orders"
)]
pub async fn get_work_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.services.work_orders.get_work_order(id).await?;
    Ok(Json(ApiResponse::success(order)))
}

#[utoipa::path(
    put,
    path = "/api/v1/work-orders/{id}",
    params(("id" = Uuid, Path, description = "Work order id")),
    request_body = UpdateWorkOrderRequest,
    responses((status = 200, description = "Work order updated")),
    tag = "work-orders"
)]
pub async fn update_work_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateWorkOrderRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state
        .services
        .work_orders
        .update_work_order(id, request)
        .await?;
    Ok(Json(ApiResponse::success(updated)))
}

#[utoipa::path(
    put,
    path = "/api/v1/work-orders/{id}/status",
    params(("id" = Uuid, Path, description = "Work order id")),
    request_body = StatusChangeRequest,
    responses(
        (status = 200, description = "Status changed"),
        (status = 409, description = "Transition not allowed", body = crate::errors::ErrorResponse)
    ),
    tag = "work-orders"
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<StatusChangeRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state
        .services
        .work_orders
        .update_status(id, request.status)
        .await?;
    Ok(Json(ApiResponse::success(updated)))
}

#[utoipa::path(
    put,
    path = "/api/v1/work-orders/{id}/assign",
    params(("id" = Uuid, Path, description = "Work order id")),
    request_body = AssignRequest,
    responses((status = 200, description = "Technician and/or advisor assigned")),
    tag = "work-orders"
)]
pub async fn assign_technician(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AssignRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state
        .services
        .work_orders
        .assign_technician(id, request.technician_id, request.service_advisor_id)
        .await?;
    Ok(Json(ApiResponse::success(updated)))
}

#[utoipa::path(
    post,
    path = "/api/v1/work-orders/{id}/cancel",
    params(("id" = Uuid, Path, description = "Work order id")),
    request_body = CancelRequest,
    responses((status = 200, description = "Work order cancelled")),
    tag = "work-orders"
)]
pub async fn cancel_work_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CancelRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state
        .services
        .work_orders
        .cancel_work_order(id, request.reason)
        .await?;
    Ok(Json(ApiResponse::success(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/work-orders/{id}",
    params(("id" = Uuid, Path, description = "Work order id")),
    responses((status = 204, description = "Work order deleted")),
    tag = "work-orders"
)]
pub async fn delete_work_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.work_orders.delete_work_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_labor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state.services.work_orders.list_labor(id).await?;
    Ok(Json(ApiResponse::success(rows)))
}

pub async fn add_labor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddLaborRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let row = state.services.work_orders.add_labor(id, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(row))))
}

pub async fn list_part_lines(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state.services.work_orders.list_part_lines(id).await?;
    Ok(Json(ApiResponse::success(rows)))
}

pub async fn add_part_line(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddPartLineRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let row = state
        .services
        .work_orders
        .add_part_line(id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(row))))
}

pub async fn list_service_lines(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state.services.work_orders.list_service_lines(id).await?;
    Ok(Json(ApiResponse::success(rows)))
}

pub async fn add_service_line(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddServiceLineRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let row = state
        .services
        .work_orders
        .add_service_line(id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(row))))
}

pub async fn list_payments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state.services.work_orders.list_payments(id).await?;
    Ok(Json(ApiResponse::success(rows)))
}

pub async fn add_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddPaymentRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let row = state.services.work_orders.add_payment(id, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(row))))
}

pub async fn list_attachments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state.services.work_orders.list_attachments(id).await?;
    Ok(Json(ApiResponse::success(rows)))
}

pub async fn add_attachment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddAttachmentRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let row = state
        .services
        .work_orders
        .add_attachment(id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(row))))
}

pub async fn list_qc_checks(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state.services.work_orders.list_qc_checks(id).await?;
    Ok(Json(ApiResponse::success(rows)))
}

pub async fn add_qc_check(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddQcCheckRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let row = state.services.work_orders.add_qc_check(id, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(row))))
}

pub async fn remove_labor(
    State(state): State<AppState>,
    Path((id, line_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.work_orders.remove_labor(id, line_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_part_line(
    State(state): State<AppState>,
    Path((id, line_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .work_orders
        .remove_part_line(id, line_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_service_line(
    State(state): State<AppState>,
    Path((id, line_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .work_orders
        .remove_service_line(id, line_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_payment(
    State(state): State<AppState>,
    Path((id, line_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .work_orders
        .remove_payment(id, line_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_attachment(
    State(state): State<AppState>,
    Path((id, line_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .work_orders
        .remove_attachment(id, line_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_qc_check(
    State(state): State<AppState>,
    Path((id, line_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .work_orders
        .remove_qc_check(id, line_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Work order routes, grouped by the permission they require.
pub fn work_orders_routes() -> Router<AppState> {
    let read = Router::new()
        .route("/", get(list_work_orders))
        .route("/board", get(get_board))
        .route("/:id", get(get_work_order))
        .route("/:id/labor", get(list_labor))
        .route("/:id/parts", get(list_part_lines))
        .route("/:id/services", get(list_service_lines))
        .route("/:id/payments", get(list_payments))
        .route("/:id/attachments", get(list_attachments))
        .route("/:id/qc-checks", get(list_qc_checks))
        .with_permission(perm::WORK_ORDERS_READ);

    let write = Router::new()
        .route("/", post(create_work_order))
        .route("/:id", put(update_work_order))
        .route("/:id/status", put(update_status))
        .route("/:id/assign", put(assign_technician))
        .route("/:id/cancel", post(cancel_work_order))
        .route("/:id/labor", post(add_labor))
        .route("/:id/labor/:line_id", delete(remove_labor))
        .route("/:id/parts", post(add_part_line))
        .route("/:id/parts/:line_id", delete(remove_part_line))
        .route("/:id/services", post(add_service_line))
        .route("/:id/services/:line_id", delete(remove_service_line))
        .route("/:id/payments", post(add_payment))
        .route("/:id/payments/:line_id", delete(remove_payment))
        .route("/:id/attachments", post(add_attachment))
        .route("/:id/attachments/:line_id", delete(remove_attachment))
        .route("/:id/qc-checks", post(add_qc_check))
        .route("/:id/qc-checks/:line_id", delete(remove_qc_check))
        .with_permission(perm::WORK_ORDERS_WRITE);

    let remove = Router::new()
        .route("/:id", delete(delete_work_order))
        .with_permission(perm::WORK_ORDERS_DELETE);

    read.merge(write).merge(remove)
}
