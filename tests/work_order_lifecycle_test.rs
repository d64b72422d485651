mod common;

use axum::http::{Method, StatusCode};
use common::{read_json, TestApp};
use serde_json::json;

/// Walks a repair job through the whole board: reception, pricing,
/// customer approval, service, and completion.
#[tokio::test]
async fn full_lifecycle_from_reception_to_completion() {
    let app = TestApp::new().await;
    let id = app
        .create_work_order("REPAIR", "Grinding noise when braking")
        .await;

    // Fresh orders land in the reception column.
    let response = app
        .request_authenticated(Method::GET, &format!("/api/v1/work-orders/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"]["status"], "RECEIVED");

    // Price the job: labor, a part, a flat service.
    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/work-orders/{id}/labor"),
            Some(json!({"description": "Replace front pads and discs", "hours": 2, "hourly_rate": 85})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/work-orders/{id}/parts"),
            Some(json!({
                "part_number": "BP-F-CER",
                "name": "Front Brake Pad Set",
                "quantity": 2,
                "unit_price": 40
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/work-orders/{id}/services"),
            Some(json!({"name": "Brake fluid flush", "price": 30})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Generate the estimate: totals are computed server-side at the 19%
    // default tax rate. 170 + 80 + 30 = 280, tax 53.20, total 333.20.
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
    assert_eq!(body["data"]["status"], "DRAFT");
    assert_eq!(body["data"]["version"], 1);
    assert_eq!(body["data"]["tax_amount"], "53.20");
    assert_eq!(body["data"]["total"], "333.20");

    let response = app
        .request_authenticated(Method::GET, &format!("/api/v1/work-orders/{id}"), None)
        .await;
    let body = read_json(response).await;
    assert_eq!(body["data"]["status"], "ESTIMATE");
    assert_eq!(body["data"]["total_amount"], "333.20");

    // Send to the customer and approve.
    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/estimates/{estimate_id}/submit"),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"]["status"], "PENDING_APPROVAL");

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/estimates/{estimate_id}/approve"),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"]["status"], "APPROVED");

    // Approval moves the order into service; a parts hold and back is fine.
    for status in ["WAITING_FOR_PARTS", "IN_PROGRESS", "COMPLETED"] {
        let response = app
            .request_authenticated(
                Method::PUT,
                &format!("/api/v1/work-orders/{id}/status"),
                Some(json!({"status": status})),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK, "move to {status}");
        let body = read_json(response).await;
        assert_eq!(body["data"]["status"], status);
    }
}

#[tokio::test]
async fn completed_orders_reject_further_transitions() {
    let app = TestApp::new().await;
    let id = app.create_work_order("MAINTENANCE", "Oil change").await;

    // Walk-in quick jobs may skip estimation entirely.
    for status in ["IN_PROGRESS", "COMPLETED"] {
        let response = app
            .request_authenticated(
                Method::PUT,
                &format!("/api/v1/work-orders/{id}/status"),
                Some(json!({"status": status})),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Reopening is an illegal edge.
    let response = app
        .request_authenticated(
            Method::PUT,
            &format!("/api/v1/work-orders/{id}/status"),
            Some(json!({"status": "RECEIVED"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Self-transitions are idempotent no-ops.
    let response = app
        .request_authenticated(
            Method::PUT,
            &format!("/api/v1/work-orders/{id}/status"),
            Some(json!({"status": "COMPLETED"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Completed orders cannot be cancelled either.
    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/work-orders/{id}/cancel"),
            Some(json!({"reason": "changed my mind"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Nor can line items be added after the fact.
    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/work-orders/{id}/labor"),
            Some(json!({"description": "late extra", "hours": 1, "hourly_rate": 85})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn estimates_require_a_quotable_status() {
    let app = TestApp::new().await;
    let id = app.create_work_order("REPAIR", "Clutch slipping").await;

    let response = app
        .request_authenticated(
            Method::PUT,
            &format!("/api/v1/work-orders/{id}/status"),
            Some(json!({"status": "IN_PROGRESS"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/work-orders/{id}/estimates"),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn regenerating_supersedes_the_draft() {
    let app = TestApp::new().await;
    let id = app.create_work_order("DIAGNOSTIC", "Check engine light").await;

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/work-orders/{id}/labor"),
            Some(json!({"description": "Diagnosis", "hours": 1, "hourly_rate": 90})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    for expected_version in 1..=2 {
        let response = app
            .request_authenticated(
                Method::POST,
                &format!("/api/v1/work-orders/{id}/estimates"),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = read_json(response).await;
        assert_eq!(body["data"]["version"], expected_version);
    }

    // Newest version first.
    let response = app
        .request_authenticated(
            Method::GET,
            &format!("/api/v1/work-orders/{id}/estimates"),
            None,
        )
        .await;
    let body = read_json(response).await;
    let versions: Vec<i64> = body["data"]
        .as_array()
        .expect("estimate list")
        .iter()
        .map(|e| e["version"].as_i64().expect("version"))
        .collect();
    assert_eq!(versions, vec![2, 1]);
}

#[tokio::test]
async fn board_groups_open_orders_by_status() {
    let app = TestApp::new().await;
    let first = app.create_work_order("REPAIR", "Exhaust rattle").await;
    let second = app.create_work_order("MAINTENANCE", "Annual service").await;
    let cancelled = app.create_work_order("OTHER", "No-show").await;
    let third = app.create_work_order("DIAGNOSTIC", "Warning light").await;

    let response = app
        .request_authenticated(
            Method::PUT,
            &format!("/api/v1/work-orders/{second}/status"),
            Some(json!({"status": "IN_PROGRESS"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/work-orders/{cancelled}/cancel"),
            Some(json!({})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request_authenticated(Method::GET, "/api/v1/work-orders/board", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let columns = body["data"].as_array().expect("board columns");
    assert_eq!(columns.len(), 6, "cancelled has no column");

    let find = |status: &str| {
        columns
            .iter()
            .find(|c| c["status"] == status)
            .unwrap_or_else(|| panic!("missing column {status}"))
    };
    let received = find("RECEIVED");
    assert_eq!(received["label"], "Reception");
    assert_eq!(received["count"], 2);
    // Newest card on top within a column.
    assert_eq!(received["work_orders"][0]["id"], third.to_string());
    assert_eq!(received["work_orders"][1]["id"], first.to_string());
    assert_eq!(
        find("IN_PROGRESS")["work_orders"][0]["id"],
        second.to_string()
    );
    assert_eq!(find("IN_PROGRESS")["count"], 1);
    let completed = find("COMPLETED");
    assert_eq!(completed["count"], 0);
    assert!(completed["work_orders"]
        .as_array()
        .expect("column cards")
        .is_empty());
    assert!(!columns.iter().any(|c| c["status"] == "CANCELLED"));
}

#[tokio::test]
async fn list_filters_by_work_order_number_fragment() {
    let app = TestApp::new().await;
    let target = app.create_work_order("REPAIR", "Clutch slipping").await;
    app.create_work_order("MAINTENANCE", "Oil change").await;

    let response = app
        .request_authenticated(
            Method::GET,
            &format!("/api/v1/work-orders/{target}"),
            None,
        )
        .await;
    let body = read_json(response).await;
    let number = body["data"]["work_order_number"]
        .as_str()
        .expect("work order number")
        .to_string();
    let fragment = &number[number.len() - 6..];

    let response = app
        .request_authenticated(
            Method::GET,
            &format!("/api/v1/work-orders?search={fragment}"),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["id"], target.to_string());

    let response = app
        .request_authenticated(Method::GET, "/api/v1/work-orders?search=NOMATCH", None)
        .await;
    let body = read_json(response).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn deleting_a_work_order_cascades_its_lines() {
    let app = TestApp::new().await;
    let id = app.create_work_order("REPAIR", "Worn wipers").await;

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/work-orders/{id}/labor"),
            Some(json!({"description": "Fit wiper blades", "hours": 0.5, "hourly_rate": 60})),
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

    let response = app
        .request_authenticated(Method::DELETE, &format!("/api/v1/work-orders/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .request_authenticated(Method::GET, &format!("/api/v1/work-orders/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The estimate goes with it.
    let response = app
        .request_authenticated(Method::GET, &format!("/api/v1/estimates/{estimate_id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn requests_without_a_token_are_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::GET, "/api/v1/work-orders", None, None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn write_permission_is_enforced_per_route() {
    let app = TestApp::new().await;
    let read_only = app.token_with(
        &[autoshop_api::auth::Roles::SERVICE_CENTER],
        &[autoshop_api::auth::permissions::WORK_ORDERS_READ],
    );

    let response = app
        .request(
            Method::GET,
            "/api/v1/work-orders",
            None,
            Some(&read_only),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(
            Method::POST,
            "/api/v1/work-orders",
            Some(json!({"job_type": "REPAIR"})),
            Some(&read_only),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
