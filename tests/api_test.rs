//! HTTP 接口测试：路由、状态码、响应体格式
//!
//! 使用内存存储，通过 `tower::ServiceExt::oneshot` 直接驱动 Router

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{failing_app, get, post_json, send, test_app, BTC_ADDR, ETH_ADDR, SOL_ADDR};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_create_wallet_returns_201() {
    let app = test_app();

    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/wallets",
            json!({"name": "Main", "chain": "Ethereum", "address": ETH_ADDR}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Main");
    assert_eq!(body["chain"], "Ethereum");
    assert_eq!(body["address"], ETH_ADDR);
    assert!(body["id"].is_string());
    assert!(body["insertedAt"].is_string());
}

#[tokio::test]
async fn test_postwallet_returns_legacy_payload() {
    let app = test_app();

    let (status, body) = send(
        &app,
        post_json(
            "/api/postwallet",
            json!({"name": "Cold", "type": "Bitcoin", "address": BTC_ADDR}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Wallet added successfully!");
    assert_eq!(body["wallet"]["name"], "Cold");
    assert_eq!(body["wallet"]["type"], "Bitcoin");
    assert_eq!(body["wallet"]["address"], BTC_ADDR);
    assert!(body["wallet"]["id"].is_string());
    assert!(body["wallet"]["inserted_at"].is_string());
}

#[tokio::test]
async fn test_getwallets_returns_legacy_payload() {
    let app = test_app();
    send(
        &app,
        post_json(
            "/api/postwallet",
            json!({"name": "Cold", "type": "Bitcoin", "address": BTC_ADDR}),
        ),
    )
    .await;

    let (status, body) = send(&app, get("/api/getwallets")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let w = &body["wallets"][0];
    assert_eq!(w["label"], "Cold");
    assert_eq!(w["type"], "bitcoin");
    assert_eq!(w["address"], BTC_ADDR);
    assert!(w["id"].is_string());
    assert!(w["inserted_at"].is_string());
    assert!(w["updated_at"].is_string());
    assert!(w.get("name").is_none());
    assert!(w.get("insertedAt").is_none());
}

#[tokio::test]
async fn test_legacy_and_v1_routes_share_the_registry() {
    let app = test_app();
    send(
        &app,
        post_json(
            "/api/v1/wallets",
            json!({"name": "Hot", "chain": "Solana", "address": SOL_ADDR}),
        ),
    )
    .await;

    let (_, body) = send(&app, get("/api/getwallets")).await;
    assert_eq!(body["wallets"][0]["label"], "Hot");
    assert_eq!(body["wallets"][0]["type"], "solana");
}

#[tokio::test]
async fn test_legacy_errors_carry_error_message() {
    let app = test_app();
    let req = || {
        post_json(
            "/api/postwallet",
            json!({"name": "dup", "type": "Ethereum", "address": ETH_ADDR}),
        )
    };
    send(&app, req()).await;

    let (status, body) = send(&app, req()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        "Wallet name already exists. Please choose a different name."
    );

    let (status, body) = send(&failing_app(), get("/api/getwallets")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to retrieve wallets. Please try again.");
}

#[tokio::test]
async fn test_list_empty() {
    let app = test_app();

    let (status, body) = send(&app, get("/api/v1/wallets")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"wallets": [], "count": 0}));
}

#[tokio::test]
async fn test_list_shape_and_order() {
    let app = test_app();
    for (name, chain, address) in [
        ("btc", "Bitcoin", BTC_ADDR),
        ("sol", "Solana", SOL_ADDR),
        ("eth", "Ethereum", ETH_ADDR),
    ] {
        let (status, _) = send(
            &app,
            post_json(
                "/api/v1/wallets",
                json!({"name": name, "chain": chain, "address": address}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, get("/api/v1/wallets")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);

    let wallets = body["wallets"].as_array().unwrap();
    let names: Vec<&str> = wallets
        .iter()
        .map(|w| w["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["eth", "sol", "btc"]);

    let first = &wallets[0];
    for key in ["id", "address", "chain", "name", "insertedAt", "updatedAt"] {
        assert!(first.get(key).is_some(), "missing key {key}");
    }
}

#[tokio::test]
async fn test_list_is_idempotent() {
    let app = test_app();
    send(
        &app,
        post_json(
            "/api/v1/wallets",
            json!({"name": "a", "chain": "Solana", "address": SOL_ADDR}),
        ),
    )
    .await;

    let (_, first) = send(&app, get("/api/v1/wallets")).await;
    let (_, second) = send(&app, get("/api/v1/wallets")).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_missing_field_is_400() {
    let app = test_app();

    let (status, body) = send(
        &app,
        post_json("/api/v1/wallets", json!({"chain": "Ethereum", "address": ETH_ADDR})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "missing_field");
    assert_eq!(body["error"], "Missing required field: name");

    let (status, body) = send(
        &app,
        post_json("/api/v1/wallets", json!({"name": "x", "chain": "Ethereum"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: address");
}

#[tokio::test]
async fn test_unsupported_chain_is_400() {
    let app = test_app();

    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/wallets",
            json!({"name": "x", "chain": "Dogecoin", "address": "DH5yaieqoZN36fDVciNyRueRGvGLR3mr7L"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "chain_not_supported");
    assert!(body["error"].as_str().unwrap().contains("Dogecoin"));
}

#[tokio::test]
async fn test_invalid_address_is_400() {
    let app = test_app();

    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/wallets",
            json!({"name": "x", "chain": "Ethereum", "address": "0x742d35Cc6634C0532925a3b8D6Ac6C77AF2AE53"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_address");

    let (_, list) = send(&app, get("/api/v1/wallets")).await;
    assert_eq!(list["count"], 0);
}

#[tokio::test]
async fn test_duplicate_name_is_409() {
    let app = test_app();
    let req = || {
        post_json(
            "/api/v1/wallets",
            json!({"name": "dup", "chain": "Solana", "address": SOL_ADDR}),
        )
    };

    let (status, _) = send(&app, req()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, req()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "wallet_already_exists");
    assert_eq!(
        body["error"],
        "Wallet name already exists. Please choose a different name."
    );
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = test_app();

    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/wallets")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn test_storage_failure_is_opaque_500() {
    let app = failing_app();

    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/wallets",
            json!({"name": "x", "chain": "Bitcoin", "address": BTC_ADDR}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "internal");
    assert_eq!(body["error"], "Failed to add wallet. Please try again.");

    let (status, body) = send(&app, get("/api/v1/wallets")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to retrieve wallets. Please try again.");
    assert!(!body.to_string().contains("10.1.2.3"));
}

#[tokio::test]
async fn test_validation_precedes_storage() {
    // 存储不可用时，输入错误仍然返回 400
    let app = failing_app();

    let (status, body) = send(
        &app,
        post_json("/api/v1/wallets", json!({"name": "x", "chain": "Litecoin", "address": "L"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "chain_not_supported");
}

#[tokio::test]
async fn test_wrong_method_is_json_405() {
    let app = test_app();

    let req = Request::builder()
        .method(Method::DELETE)
        .uri("/api/v1/wallets")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(resp.headers().contains_key("x-trace-id"));

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "method_not_allowed");
    assert!(body["traceId"].is_string());
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = test_app();

    let (status, body) = send(&app, get("/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn test_trace_id_is_echoed() {
    let app = test_app();

    let req = Request::builder()
        .uri("/api/ping")
        .header("X-Trace-Id", "trace-abc")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.headers()["x-trace-id"], "trace-abc");
}

#[tokio::test]
async fn test_error_body_carries_request_trace_id() {
    let app = test_app();

    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/wallets")
        .header(header::CONTENT_TYPE, "application/json")
        .header("X-Trace-Id", "trace-400")
        .body(Body::from(json!({"name": ""}).to_string()))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["traceId"], "trace-400");
}

#[tokio::test]
async fn test_ping() {
    let app = test_app();
    let (status, body) = send(&app, get("/api/ping")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Pong!"}));
}

#[tokio::test]
async fn test_healthz_reports_store_state() {
    let (status, body) = send(&test_app(), get("/healthz")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store_ok"], true);

    let (status, body) = send(&failing_app(), get("/healthz")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["store_ok"], false);
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = test_app();

    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/postwallet")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert!(resp.status().is_success());
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_openapi_and_metrics_served() {
    let app = test_app();

    let (status, body) = send(&app, get("/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/api/v1/wallets").is_some());
    assert!(body["paths"].get("/api/getwallets").is_some());

    send(&app, get("/api/ping")).await;
    let resp = app.clone().oneshot(get("/metrics")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("walletfolio_requests_total"));
}
