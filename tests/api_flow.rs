use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use marketplace_api::{config::AppConfig, routes::app_router, state::AppState, store::Store};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    let config = AppConfig::from_lookup(|key| match key {
        "JWT_SECRET" => Some("test-secret".to_string()),
        _ => None,
    })
    .expect("config");
    app_router(AppState::new(Store::mock(), config))
}

async fn call(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn login(app: &Router, identifier: &str, role: &str) -> String {
    let (status, body) = call(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "identifier": identifier, "role": role, "sms_code": "1234" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn wrong_sms_code_is_rejected() {
    let app = app();
    let (status, body) = call(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "identifier": "11900001111", "sms_code": "9999" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("SMS"));
}

#[tokio::test]
async fn shop_registration_requires_email_code() {
    let app = app();
    let registration = json!({
        "shop_name": "Loja Nova",
        "email": "nova@loja.com",
        "address": "Rua Augusta, 10"
    });

    let (status, _) = call(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "identifier": "11922223333",
            "role": "shop",
            "sms_code": "1234",
            "registration": registration
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "identifier": "11922223333",
            "role": "shop",
            "sms_code": "1234",
            "email_code": "5555",
            "registration": registration
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["user"]["role"], "shop");
    assert_eq!(body["data"]["user"]["name"], "Loja Nova");
    assert_eq!(body["data"]["user"]["plan"], "free_trial");
    assert_eq!(body["meta"]["sync"]["state"], "local_only");

    let (_, shops) = call(&app, "GET", "/api/shops", None, None).await;
    let names: Vec<&str> = shops["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["name"].as_str())
        .collect();
    assert!(names.contains(&"Loja Nova"));
}

#[tokio::test]
async fn shop_lists_item_and_buyer_finds_it() {
    let app = app();
    let token = login(&app, "tech@akira.com", "shop").await;

    let (status, created) = call(
        &app,
        "POST",
        "/api/products",
        Some(&token),
        Some(json!({
            "title": "Implante Ótico",
            "description": "Visão noturna",
            "price": "899.90",
            "category": "Informática",
            "brand": "Zetatech",
            "model": "Owl-3"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{created}");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, found) = call(&app, "GET", "/api/products?q=zeta&per_page=5", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["data"][0]["id"], id.as_str());
    assert_eq!(found["data"][0]["price"], "899.90");
    assert_eq!(found["meta"]["total"], 1);

    let (_, by_category) = call(&app, "GET", "/api/products?category=Moda%20Masculina", None, None).await;
    assert_eq!(by_category["data"].as_array().unwrap().len(), 1);

    let (status, status_body) = call(&app, "GET", "/api/plans/status", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(status_body["data"]["items_used"], 2);
    assert_eq!(status_body["data"]["item_limit"], 20);
    assert_eq!(status_body["data"]["expires_soon"], true);
}

#[tokio::test]
async fn buyer_cannot_list_items() {
    let app = app();
    let token = login(&app, "11944445555", "user").await;

    let (status, _) = call(
        &app,
        "POST",
        "/api/products",
        Some(&token),
        Some(json!({ "title": "Nada", "price": "1.00", "category": "Outros" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, listed) = call(&app, "GET", "/api/products", None, None).await;
    assert_eq!(listed["meta"]["total"], 2);
}

#[tokio::test]
async fn logout_invalidates_token() {
    let app = app();
    let token = login(&app, "11966667777", "user").await;

    let (status, me) = call(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["data"]["role"], "user");

    let (status, _) = call(&app, "POST", "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn guest_chats_about_a_product() {
    let app = app();
    let (status, guest) = call(&app, "POST", "/api/auth/guest", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(guest["data"]["name"], "Visitante");
    let guest_id = guest["data"]["id"].as_str().unwrap();
    assert!(guest_id.starts_with("guest_"));

    let (status, _) = call(
        &app,
        "POST",
        "/api/products/p1/messages",
        None,
        Some(json!({ "text": "Ainda disponível?", "guest": guest["data"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(
        &app,
        "POST",
        "/api/products/p1/messages",
        None,
        Some(json!({ "text": "sem remetente" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, thread) = call(&app, "GET", "/api/products/p1/messages", None, None).await;
    let messages = thread["data"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["sender_id"], guest_id);
}

#[tokio::test]
async fn admin_manages_categories() {
    let app = app();
    let admin = login(&app, "admin@akira.com", "user").await;
    let buyer = login(&app, "11977778888", "user").await;

    let (status, _) = call(&app, "POST", "/api/categories", Some(&buyer), Some(json!({ "name": "Games" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = call(&app, "POST", "/api/categories", Some(&admin), Some(json!({ "name": "Games" }))).await;
    assert_eq!(status, StatusCode::OK, "{created}");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (_, list) = call(&app, "GET", "/api/categories", None, None).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 10);

    let (status, _) = call(&app, "DELETE", &format!("/api/categories/{id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&app, "DELETE", &format!("/api/categories/{id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn distance_to_selling_shop() {
    let app = app();
    let (status, body) = call(
        &app,
        "GET",
        "/api/products/p1/distance?lat=-23.5657&lng=-46.6514",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["shop_id"], "shop1");
    assert_eq!(body["data"]["label"], "0 m");
}

#[tokio::test]
async fn orders_show_on_both_sides() {
    let app = app();
    let buyer = login(&app, "11988889999", "user").await;
    let shop = login(&app, "tech@akira.com", "shop").await;

    let (status, placed) = call(&app, "POST", "/api/orders", Some(&buyer), Some(json!({ "product_id": "p1" }))).await;
    assert_eq!(status, StatusCode::OK, "{placed}");
    assert_eq!(placed["data"]["status"], "pending");
    assert_eq!(placed["data"]["shop_id"], "shop1");

    let (_, mine) = call(&app, "GET", "/api/orders", Some(&buyer), None).await;
    assert_eq!(mine["data"]["items"].as_array().unwrap().len(), 1);

    let (_, sales) = call(&app, "GET", "/api/orders/sales?status=pending", Some(&shop), None).await;
    assert_eq!(sales["data"]["items"].as_array().unwrap().len(), 1);

    let (status, _) = call(&app, "GET", "/api/orders/sales", Some(&buyer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, sync) = call(&app, "GET", "/api/sync", None, None).await;
    assert_eq!(sync["data"]["backend"], "mock");
    assert_eq!(sync["data"]["failed"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn out_of_range_page_returns_empty_list() {
    let app = app();
    let (status, body) = call(&app, "GET", "/api/products?page=18446744073709551615", None, None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn profile_cannot_take_another_shops_email() {
    let app = app();
    let token = login(&app, "fashion@akira.com", "shop").await;
    let (status, body) = call(
        &app,
        "PATCH",
        "/api/profile",
        Some(&token),
        Some(json!({ "email": "tech@akira.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert!(body["message"].as_str().unwrap().contains("another profile"));
}
