mod common;

use axum::http::{Method, StatusCode};
use common::{read_json, TestApp};
use serde_json::{json, Value};
use uuid::Uuid;

async fn seed_part(app: &TestApp, body: Value) -> Uuid {
    let response = app
        .request_authenticated(Method::POST, "/api/v1/parts", Some(body))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    Uuid::parse_str(body["data"]["id"].as_str().expect("part id")).expect("part id is a uuid")
}

fn brake_pads(part_number: &str, quantity: i32, min_quantity: i32) -> Value {
    json!({
        "part_number": part_number,
        "name": format!("Brake Pad Set {part_number}"),
        "category": "BRAKES",
        "price": 58,
        "quantity": quantity,
        "min_quantity": min_quantity,
        "details": {
            "category": "BRAKES",
            "position": "FRONT",
            "material": "ceramic"
        }
    })
}

#[tokio::test]
async fn create_decodes_details_and_derives_availability() {
    let app = TestApp::new().await;
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/parts",
            Some(json!({
                "part_number": "EO-5W30-5L",
                "name": "Engine Oil 5W-30",
                "category": "ENGINE_AND_FLUIDS",
                "price": 42.5,
                "quantity": 3,
                "min_quantity": 8,
                "details": {
                    "category": "ENGINE_AND_FLUIDS",
                    "viscosity": "5W-30",
                    "volume_liters": 5.0
                }
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["data"]["availability"], "LOW_STOCK");
    assert_eq!(body["data"]["details"]["viscosity"], "5W-30");
    assert_eq!(body["data"]["details"]["category"], "ENGINE_AND_FLUIDS");
}

#[tokio::test]
async fn mismatched_details_tag_is_rejected() {
    let app = TestApp::new().await;
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/parts",
            Some(json!({
                "part_number": "BAT-AGM70",
                "name": "AGM Battery",
                "category": "ELECTRICAL",
                "price": 139,
                "quantity": 5,
                "min_quantity": 2,
                "details": { "category": "BRAKES", "position": "FRONT" }
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_part_numbers_conflict() {
    let app = TestApp::new().await;
    seed_part(&app, brake_pads("BP-0001", 10, 2)).await;

    let response = app
        .request_authenticated(Method::POST, "/api/v1/parts", Some(brake_pads("BP-0001", 4, 1)))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn list_paginates_with_default_page_size_five() {
    let app = TestApp::new().await;
    for i in 0..12 {
        seed_part(&app, brake_pads(&format!("BP-{i:04}"), 10, 2)).await;
    }

    let response = app
        .request_authenticated(Method::GET, "/api/v1/parts", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["items"].as_array().expect("items").len(), 5);
    assert_eq!(body["total"], 12);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 5);
    assert_eq!(body["total_pages"], 3);

    // 12 rows at 5 per page: the last page holds exactly two.
    let response = app
        .request_authenticated(Method::GET, "/api/v1/parts?page=3", None)
        .await;
    let body = read_json(response).await;
    assert_eq!(body["items"].as_array().expect("items").len(), 2);

    // Out-of-range pages come back empty with the totals intact.
    let response = app
        .request_authenticated(Method::GET, "/api/v1/parts?page=9", None)
        .await;
    let body = read_json(response).await;
    assert!(body["items"].as_array().expect("items").is_empty());
    assert_eq!(body["total"], 12);
}

#[tokio::test]
async fn category_filter_is_loose_about_case_and_whitespace() {
    let app = TestApp::new().await;
    seed_part(&app, brake_pads("BP-0001", 10, 2)).await;
    seed_part(
        &app,
        json!({
            "part_number": "FM-AW-4",
            "name": "Floor Mats",
            "category": "ACCESSORIES",
            "price": 34.9,
            "quantity": 12,
            "min_quantity": 4
        }),
    )
    .await;

    for query in ["category=brakes", "category=%20Brakes%20", "category=BRAKES"] {
        let response = app
            .request_authenticated(Method::GET, &format!("/api/v1/parts?{query}"), None)
            .await;
        let body = read_json(response).await;
        assert_eq!(body["total"], 1, "query {query}");
        assert_eq!(body["items"][0]["category"], "BRAKES");
    }

    // Unknown categories match nothing rather than erroring.
    let response = app
        .request_authenticated(Method::GET, "/api/v1/parts?category=tyres", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn search_reaches_into_detail_fields() {
    let app = TestApp::new().await;
    seed_part(&app, brake_pads("BP-0001", 10, 2)).await;
    seed_part(
        &app,
        json!({
            "part_number": "TP-LY9C",
            "name": "Touch-Up Paint",
            "category": "PAINT_AND_BODY",
            "price": 19.9,
            "quantity": 15,
            "min_quantity": 3,
            "details": { "category": "PAINT_AND_BODY", "color_code": "LY9C" }
        }),
    )
    .await;

    // "front" only appears in the brake pad's detail record.
    let response = app
        .request_authenticated(Method::GET, "/api/v1/parts?search=front", None)
        .await;
    let body = read_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["part_number"], "BP-0001");

    let response = app
        .request_authenticated(Method::GET, "/api/v1/parts?search=ly9c", None)
        .await;
    let body = read_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["part_number"], "TP-LY9C");
}

#[tokio::test]
async fn categories_endpoint_lists_field_configuration() {
    let app = TestApp::new().await;
    let response = app
        .request_authenticated(Method::GET, "/api/v1/parts/categories", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let categories = body["data"].as_array().expect("category list");
    assert_eq!(categories.len(), 5);
    let brakes = categories
        .iter()
        .find(|c| c["name"] == "BRAKES")
        .expect("brakes category");
    assert_eq!(brakes["display_name"], "Brakes");
    assert!(brakes["detail_fields"]
        .as_array()
        .expect("detail fields")
        .iter()
        .any(|f| f == "position"));
}

#[tokio::test]
async fn stock_adjustments_update_availability_and_guard_negatives() {
    let app = TestApp::new().await;
    let id = seed_part(&app, brake_pads("BP-0001", 6, 6)).await;

    // Consume two: still at/below threshold.
    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/inventory/{id}/adjust"),
            Some(json!({"delta": -2})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"]["quantity"], 4);
    assert_eq!(body["data"]["availability"], "LOW_STOCK");

    // A stocktake sets the absolute count.
    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/inventory/{id}/adjust"),
            Some(json!({"set": 20})),
        )
        .await;
    let body = read_json(response).await;
    assert_eq!(body["data"]["quantity"], 20);
    assert_eq!(body["data"]["availability"], "IN_STOCK");

    // Draining below zero is refused and leaves the count untouched.
    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/inventory/{id}/adjust"),
            Some(json!({"delta": -25})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Exactly one of set/delta must be present.
    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/inventory/{id}/adjust"),
            Some(json!({"set": 1, "delta": 1})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // A delta that would overflow the counter is refused, not wrapped.
    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/inventory/{id}/adjust"),
            Some(json!({"delta": i32::MAX})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request_authenticated(Method::GET, "/api/v1/inventory", None)
        .await;
    let body = read_json(response).await;
    assert_eq!(body["data"][0]["quantity"], 20);
}

#[tokio::test]
async fn low_stock_report_sorts_worst_first() {
    let app = TestApp::new().await;
    seed_part(&app, brake_pads("BP-OK", 30, 5)).await;
    seed_part(&app, brake_pads("BP-LOW", 3, 5)).await;
    seed_part(&app, brake_pads("BP-OUT", 0, 5)).await;

    let response = app
        .request_authenticated(Method::GET, "/api/v1/inventory/low-stock", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let rows = body["data"].as_array().expect("low stock rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["part_number"], "BP-OUT");
    assert_eq!(rows[0]["availability"], "OUT_OF_STOCK");
    assert_eq!(rows[1]["part_number"], "BP-LOW");

    let response = app
        .request_authenticated(Method::GET, "/api/v1/inventory/out-of-stock", None)
        .await;
    let body = read_json(response).await;
    let rows = body["data"].as_array().expect("out of stock rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["part_number"], "BP-OUT");
}
