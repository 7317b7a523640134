//! Integration tests for the public surface: frontend shell, JSON API,
//! health checks, and the 404 fallback.

use axum::http::StatusCode;
use serde_json::Value;

use partfinder_integration_tests::{body_string, get, spawn};
use partfinder_web::db::ProductRepository;
use partfinder_web::models::NewProduct;

fn new_product(lwc: &str, partner: Option<&str>) -> NewProduct {
    NewProduct {
        product_type: "A".to_owned(),
        lwc: lwc.to_owned(),
        partner: partner.map(str::to_owned),
        insulation: "FOIL".to_owned(),
        length: "30".to_owned(),
        blade_size: "1/4".to_owned(),
        layers: "2".to_owned(),
        qty_per_pallet: 10,
        box_pallet: 5,
        part_number: None,
    }
}

#[tokio::test]
async fn health_endpoints_respond() {
    let app = spawn().await;

    let response = get(&app, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");

    let response = get(&app, "/health/ready", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn api_products_empty_store() {
    let app = spawn().await;

    let response = get(&app, "/api/products", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["items"], serde_json::json!([]));
}

#[tokio::test]
async fn api_products_uses_canonical_field_names() {
    let app = spawn().await;
    let repo = ProductRepository::new(&app.pool);
    repo.insert(&new_product("X1", Some("P1"))).await.unwrap();

    let response = get(&app, "/api/products", None).await;
    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();

    let item = &json["items"][0];
    assert_eq!(item["type"], "A");
    assert_eq!(item["lwc"], "X1");
    assert_eq!(item["partner"], "P1");
    assert_eq!(item["bladeSize"], "1/4");
    assert_eq!(item["qtyPerPallet"], 10);
    assert_eq!(item["boxPallet"], 5);
    // No part number derived yet, so the key is absent entirely.
    assert!(item.get("partNumber").is_none());
}

#[tokio::test]
async fn api_products_sorted_by_composite_key() {
    let app = spawn().await;
    let repo = ProductRepository::new(&app.pool);
    repo.insert(&new_product("X2", None)).await.unwrap();
    repo.insert(&new_product("X1", Some("P1"))).await.unwrap();
    repo.insert(&new_product("X1", None)).await.unwrap();

    let response = get(&app, "/api/products", None).await;
    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();

    let lwcs: Vec<&str> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["lwc"].as_str().unwrap())
        .collect();
    // NULL partners sort first within the same lwc.
    assert_eq!(lwcs, ["X1", "X1", "X2"]);
    assert!(json["items"][0].get("partner").is_none());
    assert_eq!(json["items"][1]["partner"], "P1");
}

#[tokio::test]
async fn api_products_degrades_to_empty_on_store_failure() {
    let app = spawn().await;

    // Break the store out from under the handler.
    sqlx::query("DROP TABLE product")
        .execute(&app.pool)
        .await
        .unwrap();

    let response = get(&app, "/api/products", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["items"], serde_json::json!([]));
}

#[tokio::test]
async fn root_serves_frontend_shell() {
    let app = spawn().await;

    let response = get(&app, "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("<title>Partfinder</title>"));
    assert!(body.contains("lwcFilter"));
}

#[tokio::test]
async fn unmatched_path_gets_shell_with_404() {
    let app = spawn().await;

    let response = get(&app, "/no/such/page", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_string(response).await;
    assert!(body.contains("<title>Partfinder</title>"));
}
