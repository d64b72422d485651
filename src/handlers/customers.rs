use crate::{
    auth::{permissions as perm, AuthRouterExt},
    entities::{customer, vehicle},
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
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub make: String,
    #[validate(length(min = 1, max = 100))]
    pub model: String,
    pub year: Option<i32>,
    pub plate: Option<String>,
    pub vin: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/customers",
    request_body = CreateCustomerRequest,
    responses((status = 201, description = "Customer created")),
    tag = "customers"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    request.validate()?;
    let saved = customer::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(request.name),
        email: Set(request.email),
        phone: Set(request.phone),
        created_at: Set(Utc::now()),
    }
    .insert(&*state.db)
    .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(saved))))
}

#[utoipa::path(
    get,
    path = "/api/v1/customers",
    responses((status = 200, description = "All customers, alphabetical")),
    tag = "customers"
)]
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = customer::Entity::find()
        .order_by_asc(customer::Column::Name)
        .all(&*state.db)
        .await?;
    Ok(Json(ApiResponse::success(rows)))
}

#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer id")),
    responses((status = 200, description = "Customer detail")),
    tag = "customers"
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let row = customer::Entity::find_by_id(id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Customer {} not found", id)))?;
    Ok(Json(ApiResponse::success(row)))
}

#[utoipa::path(
    post,
    path = "/api/v1/customers/{id}/vehicles",
    params(("id" = Uuid, Path, description = "Customer id")),
    request_body = CreateVehicleRequest,
    responses((status = 201, description = "Vehicle registered to customer")),
    tag = "customers"
)]
pub async fn add_vehicle(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    request.validate()?;
    customer::Entity::find_by_id(customer_id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Customer {} not found", customer_id)))?;

    let saved = vehicle::ActiveModel {
        id: Set(Uuid::new_v4()),
        customer_id: Set(customer_id),
        make: Set(request.make),
        model: Set(request.model),
        year: Set(request.year),
        plate: Set(request.plate),
        vin: Set(request.vin),
        created_at: Set(Utc::now()),
    }
    .insert(&*state.db)
    .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(saved))))
}

#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}/vehicles",
    params(("id" = Uuid, Path, description = "Customer id")),
    responses((status = 200, description = "Customer's vehicles")),
    tag = "customers"
)]
pub async fn list_vehicles(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = vehicle::Entity::find()
        .filter(vehicle::Column::CustomerId.eq(customer_id))
        .order_by_desc(vehicle::Column::CreatedAt)
        .all(&*state.db)
        .await?;
    Ok(Json(ApiResponse::success(rows)))
}

pub fn customers_routes() -> Router<AppState> {
    let read = Router::new()
        .route("/", get(list_customers))
        .route("/:id", get(get_customer))
        .route("/:id/vehicles", get(list_vehicles))
        .with_permission(perm::CUSTOMERS_READ);

    let write = Router::new()
        .route("/", post(create_customer))
        .route("/:id/vehicles", post(add_vehicle))
        .with_permission(perm::CUSTOMERS_WRITE);

    read.merge(write)
}
