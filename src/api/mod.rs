use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    api::{
        handlers::{
            create_wallet, get_wallets_legacy, healthz, list_wallets, metrics, not_found,
            openapi_json, ping, post_wallet_legacy,
        },
        middleware::{json_method_not_allowed, trace_id_middleware},
    },
    app_state::AppState,
};

pub mod handlers;
pub mod middleware;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Walletfolio API",
        description = "Register named blockchain wallet addresses and list them"
    ),
    paths(
        handlers::create_wallet,
        handlers::list_wallets,
        handlers::post_wallet_legacy,
        handlers::get_wallets_legacy,
        handlers::ping,
        handlers::healthz,
    ),
    components(schemas(
        handlers::CreateWalletReq,
        handlers::WalletCreatedResp,
        handlers::WalletResp,
        handlers::ListWalletsResp,
        handlers::LegacyCreatedWallet,
        handlers::LegacyCreatedResp,
        handlers::LegacyWalletResp,
        handlers::LegacyListResp,
        handlers::PingResp,
        handlers::Healthz,
        crate::domain::Chain,
        crate::error_body::ErrorBodyDoc,
    ))
)]
pub struct ApiDoc;

pub fn routes(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.cors_allow_origins);

    Router::new()
        // 旧前端路径
        .route("/api/postwallet", axum::routing::post(post_wallet_legacy))
        .route("/api/getwallets", get(get_wallets_legacy))
        .route("/api/v1/wallets", get(list_wallets).post(create_wallet))
        .route("/api/ping", get(ping))
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .route("/openapi.json", get(openapi_json))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(from_fn(trace_id_middleware))
                // 需要在 trace_id 之后执行，才能拿到请求扩展里的 trace_id
                .layer(from_fn(json_method_not_allowed)),
        )
        .with_state(state)
}

/// `*` 放行任意来源；否则按逗号分隔的白名单匹配
pub fn cors_layer(origins: &str) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(86400));

    if origins.trim() == "*" {
        return base.allow_origin(Any);
    }

    let list: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(list))
}
