mod common;

use axum::http::{Method, StatusCode};
use common::{read_json, TestApp};
use serde_json::json;

/// Drives one job from reception through pricing to completion so the
/// revenue report has something to count.
async fn complete_priced_job(app: &TestApp) -> String {
    let id = app.create_work_order("REPAIR", "Timing belt").await;

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/work-orders/{id}/labor"),
            Some(json!({"description": "Belt replacement", "hours": 4, "hourly_rate": 100})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/work-orders/{id}/estimates"),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    let estimate_id = body["data"]["id"].as_str().expect("estimate id").to_string();

    for action in ["submit", "approve"] {
        let response = app
            .request_authenticated(
                Method::POST,
                &format!("/api/v1/estimates/{estimate_id}/{action}"),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/work-orders/{id}/payments"),
            Some(json!({"amount": 476, "method": "CARD", "reference": "txn-0001"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request_authenticated(
            Method::PUT,
            &format!("/api/v1/work-orders/{id}/status"),
            Some(json!({"status": "COMPLETED"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    id.to_string()
}

#[tokio::test]
async fn revenue_report_totals_completed_orders() {
    let app = TestApp::new().await;
    complete_priced_job(&app).await;

    // A second order that never completes must not count.
    app.create_work_order("MAINTENANCE", "Open job").await;

    let response = app
        .request_authenticated(Method::GET, "/api/v1/reports/revenue", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let report = &body["data"];

    // Labor 400, tax 19% = 76, gross 476. Commission is 10% of the
    // tax-exclusive gross: 40. Net = 476 - 76 - 40 = 360.
    assert_eq!(report["completed_orders"], 1);
    assert_eq!(report["gross_revenue"], "476.00");
    assert_eq!(report["tax_collected"], "76.00");
    assert_eq!(report["commission"], "40.00");
    assert_eq!(report["net_revenue"], "360.00");
    assert_eq!(report["payments_received"], "476");
}

#[tokio::test]
async fn revenue_report_window_excludes_earlier_completions() {
    let app = TestApp::new().await;
    complete_priced_job(&app).await;

    // A window that starts in the future sees nothing.
    let response = app
        .request_authenticated(
            Method::GET,
            "/api/v1/reports/revenue?from=2099-01-01T00:00:00Z",
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"]["completed_orders"], 0);
    assert_eq!(body["data"]["gross_revenue"], "0");
}

#[tokio::test]
async fn dashboard_summary_counts_statuses_and_stock() {
    let app = TestApp::new().await;
    complete_priced_job(&app).await;
    app.create_work_order("REPAIR", "Open job one").await;
    app.create_work_order("REPAIR", "Open job two").await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/parts",
            Some(json!({
                "part_number": "CL-G12-15",
                "name": "Coolant G12",
                "category": "ENGINE_AND_FLUIDS",
                "price": 10,
                "quantity": 2,
                "min_quantity": 4
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request_authenticated(Method::GET, "/api/v1/reports/dashboard", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let summary = &body["data"];

    assert_eq!(summary["open_work_orders"], 2);
    assert_eq!(summary["completed_this_period"], 1);
    assert_eq!(summary["parts_in_catalog"], 1);
    assert_eq!(summary["low_stock_parts"], 1);
    assert_eq!(summary["inventory_value"], "20");

    let counts = summary["status_counts"].as_array().expect("status counts");
    assert_eq!(counts.len(), 7, "one row per lifecycle status");
    let received = counts
        .iter()
        .find(|c| c["status"] == "RECEIVED")
        .expect("received row");
    assert_eq!(received["workflow_step"], "Reception");
    assert_eq!(received["count"], 2);
}
