use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Autoshop API",
        version = "0.1.0",
        description = r#"
# Autoshop Service & Parts API

Backend for a multi-role automotive marketplace: service centers run work
orders through a kanban lifecycle (reception, estimation, approval, service,
parts hold, completion) while vendors manage a categorised parts catalog with
derived stock availability.

## Authentication

All endpoints require a JWT bearer token:

```
Authorization: Bearer <token>
```

Permissions follow a `resource:action` scheme; admins bypass permission
checks.

## Pagination

List endpoints accept `page` (1-based) and `limit` (default 5, max 100).
        "#
    ),
    paths(
        crate::handlers::work_orders::create_work_order,
        crate::handlers::work_orders::list_work_orders,
        crate::handlers::work_orders::get_board,
        crate::handlers::work_orders::get_work_order,
        crate::handlers::work_orders::update_work_order,
        crate::handlers::work_orders::update_status,
        crate::handlers::work_orders::assign_technician,
        crate::handlers::work_orders::cancel_work_order,
        crate::handlers::work_orders::delete_work_order,
        crate::handlers::estimates::generate_estimate,
        crate::handlers::estimates::list_estimates,
        crate::handlers::estimates::get_estimate,
        crate::handlers::estimates::submit_estimate,
        crate::handlers::estimates::approve_estimate,
        crate::handlers::estimates::reject_estimate,
        crate::handlers::inspections::create_template,
        crate::handlers::inspections::list_templates,
        crate::handlers::inspections::get_template,
        crate::handlers::inspections::template_items,
        crate::handlers::inspections::deactivate_template,
        crate::handlers::inspections::start_inspection,
        crate::handlers::inspections::list_inspections,
        crate::handlers::inspections::get_inspection,
        crate::handlers::inspections::update_checklist_item,
        crate::handlers::parts::create_part,
        crate::handlers::parts::list_parts,
        crate::handlers::parts::list_categories,
        crate::handlers::parts::get_part,
        crate::handlers::parts::update_part,
        crate::handlers::parts::delete_part,
        crate::handlers::inventory::stock_levels,
        crate::handlers::inventory::low_stock,
        crate::handlers::inventory::out_of_stock,
        crate::handlers::inventory::adjust_stock,
        crate::handlers::customers::create_customer,
        crate::handlers::customers::list_customers,
        crate::handlers::customers::get_customer,
        crate::handlers::customers::add_vehicle,
        crate::handlers::customers::list_vehicles,
        crate::handlers::reports::revenue,
        crate::handlers::reports::dashboard,
    ),
    components(schemas(
        crate::errors::ErrorResponse,
        crate::models::WorkOrderStatus,
        crate::models::JobType,
        crate::models::WorkOrderPriority,
        crate::models::WorkOrderSource,
        crate::models::Availability,
        crate::models::ChecklistItemStatus,
        crate::models::ChecklistSignal,
        crate::models::PartCategory,
        crate::models::PartDetails,
        crate::commands::work_orders::CreateWorkOrderCommand,
        crate::entities::work_order_payment::PaymentMethod,
        crate::handlers::work_orders::StatusChangeRequest,
        crate::handlers::work_orders::AssignRequest,
        crate::handlers::work_orders::CancelRequest,
        crate::handlers::inspections::StartInspectionRequest,
        crate::handlers::inventory::AdjustStockRequest,
        crate::handlers::customers::CreateCustomerRequest,
        crate::handlers::customers::CreateVehicleRequest,
        crate::services::catalog::CreatePartRequest,
        crate::services::catalog::UpdatePartRequest,
        crate::services::catalog::PartView,
        crate::services::catalog::CategoryInfo,
        crate::services::inventory::StockLevel,
        crate::services::inspections::CreateTemplateRequest,
        crate::services::inspections::UpdateChecklistItemRequest,
        crate::services::inspections::InspectionSummary,
        crate::services::inspections::TemplateWithItems,
        crate::services::work_orders::UpdateWorkOrderRequest,
        crate::services::work_orders::AddLaborRequest,
        crate::services::work_orders::AddPartLineRequest,
        crate::services::work_orders::AddServiceLineRequest,
        crate::services::work_orders::AddPaymentRequest,
        crate::services::work_orders::AddAttachmentRequest,
        crate::services::work_orders::AddQcCheckRequest,
        crate::services::reports::RevenueReport,
        crate::services::reports::DashboardSummary,
    )),
    tags(
        (name = "work-orders", description = "Work order lifecycle and sub-resources"),
        (name = "estimates", description = "Estimate generation and customer approval"),
        (name = "inspections", description = "Inspection templates and checklists"),
        (name = "parts", description = "Parts catalog"),
        (name = "inventory", description = "Stock levels and adjustments"),
        (name = "customers", description = "Customers and vehicles"),
        (name = "reports", description = "Revenue and dashboard reporting"),
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
