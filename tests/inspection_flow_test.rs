mod common;

use axum::http::{Method, StatusCode};
use common::{read_json, TestApp};
use serde_json::json;

async fn seed_template(app: &TestApp) -> String {
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/inspection-templates",
            Some(json!({
                "name": "Multi-Point Inspection",
                "category": "general",
                "items": [
                    "Engine oil level",
                    "Brake pads and discs",
                    "Tire tread depth"
                ]
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    body["data"]["id"].as_str().expect("template id").to_string()
}

#[tokio::test]
async fn starting_an_inspection_copies_the_template_checklist() {
    let app = TestApp::new().await;
    let template_id = seed_template(&app).await;
    let work_order = app.create_work_order("INSPECTION", "Annual check").await;

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/work-orders/{work_order}/inspections"),
            Some(json!({"template_id": template_id})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["data"]["template_name"], "Multi-Point Inspection");

    let items = body["data"]["items"].as_array().expect("checklist items");
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|i| i["status"] == "pending"));
    assert_eq!(items[0]["label"], "Engine oil level");
    assert_eq!(items[0]["position"], 0);

    let summary = &body["data"]["summary"];
    assert_eq!(summary["total"], 3);
    assert_eq!(summary["open"], 3);
    assert_eq!(summary["green"], 0);
}

#[tokio::test]
async fn item_updates_return_the_refreshed_summary() {
    let app = TestApp::new().await;
    let template_id = seed_template(&app).await;
    let work_order = app.create_work_order("INSPECTION", "Pre-purchase check").await;

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/work-orders/{work_order}/inspections"),
            Some(json!({"template_id": template_id})),
        )
        .await;
    let body = read_json(response).await;
    let inspection_id = body["data"]["id"].as_str().expect("inspection id").to_string();
    let items: Vec<String> = body["data"]["items"]
        .as_array()
        .expect("items")
        .iter()
        .map(|i| i["id"].as_str().expect("item id").to_string())
        .collect();

    // Pass, warn, fail one each; the summary keeps up per update.
    for (item_id, status) in items.iter().zip(["pass", "warning", "fail"]) {
        let response = app
            .request_authenticated(
                Method::PUT,
                &format!("/api/v1/inspections/{inspection_id}/items/{item_id}"),
                Some(json!({"status": status, "notes": "checked"})),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .request_authenticated(
            Method::GET,
            &format!("/api/v1/inspections/{inspection_id}"),
            None,
        )
        .await;
    let body = read_json(response).await;
    let summary = &body["data"]["summary"];
    assert_eq!(summary["total"], 3);
    assert_eq!(summary["open"], 0);
    assert_eq!(summary["green"], 1);
    assert_eq!(summary["yellow"], 1);
    assert_eq!(summary["red"], 1);
}

#[tokio::test]
async fn foreign_checklist_items_are_not_addressable() {
    let app = TestApp::new().await;
    let template_id = seed_template(&app).await;
    let work_order = app.create_work_order("INSPECTION", "Safety check").await;

    let mut inspection_ids = Vec::new();
    let mut first_items = Vec::new();
    for round in 0..2 {
        let response = app
            .request_authenticated(
                Method::POST,
                &format!("/api/v1/work-orders/{work_order}/inspections"),
                Some(json!({"template_id": template_id})),
            )
            .await;
        let body = read_json(response).await;
        inspection_ids.push(body["data"]["id"].as_str().expect("id").to_string());
        if round == 0 {
            first_items.push(
                body["data"]["items"][0]["id"]
                    .as_str()
                    .expect("item id")
                    .to_string(),
            );
        }
    }

    // Addressing the first inspection's item through the second is a 404.
    let response = app
        .request_authenticated(
            Method::PUT,
            &format!(
                "/api/v1/inspections/{}/items/{}",
                inspection_ids[1], first_items[0]
            ),
            Some(json!({"status": "pass"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn inspections_require_an_existing_work_order() {
    let app = TestApp::new().await;
    let template_id = seed_template(&app).await;

    let response = app
        .request_authenticated(
            Method::POST,
            &format!(
                "/api/v1/work-orders/{}/inspections",
                uuid::Uuid::new_v4()
            ),
            Some(json!({"template_id": template_id})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_work_order_removes_its_inspections() {
    let app = TestApp::new().await;
    let template_id = seed_template(&app).await;
    let work_order = app.create_work_order("INSPECTION", "Trade-in appraisal").await;

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/work-orders/{work_order}/inspections"),
            Some(json!({"template_id": template_id})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    let inspection_id = body["data"]["id"].as_str().expect("inspection id").to_string();

    let response = app
        .request_authenticated(
            Method::DELETE,
            &format!("/api/v1/work-orders/{work_order}"),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .request_authenticated(
            Method::GET,
            &format!("/api/v1/inspections/{inspection_id}"),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn retired_templates_cannot_start_inspections() {
    let app = TestApp::new().await;
    let template_id = seed_template(&app).await;
    let work_order = app.create_work_order("INSPECTION", "Late booking").await;

    let response = app
        .request_authenticated(
            Method::DELETE,
            &format!("/api/v1/inspection-templates/{template_id}"),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The default template listing hides retired ones.
    let response = app
        .request_authenticated(Method::GET, "/api/v1/inspection-templates", None)
        .await;
    let body = read_json(response).await;
    assert!(body["data"].as_array().expect("templates").is_empty());

    let response = app
        .request_authenticated(
            Method::GET,
            "/api/v1/inspection-templates?include_inactive=true",
            None,
        )
        .await;
    let body = read_json(response).await;
    assert_eq!(body["data"].as_array().expect("templates").len(), 1);

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/work-orders/{work_order}/inspections"),
            Some(json!({"template_id": template_id})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
