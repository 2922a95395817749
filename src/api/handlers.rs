use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::{
    api::{middleware::TraceId, ApiDoc},
    app_state::AppState,
    domain::{Chain, WalletRecord},
    error::AppError,
};

const ADD_FAILED: &str = "Failed to add wallet. Please try again.";
const LIST_FAILED: &str = "Failed to retrieve wallets. Please try again.";

// -------- 钱包登记 --------

/// 缺失字段按空字符串处理，交给服务层报告 MissingField
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateWalletReq {
    #[serde(default)]
    pub name: Option<String>,
    /// 兼容旧前端的 `type` 字段
    #[serde(default, alias = "type")]
    #[schema(example = "Ethereum")]
    pub chain: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WalletCreatedResp {
    pub id: Uuid,
    pub name: String,
    pub chain: Chain,
    pub address: String,
    pub inserted_at: DateTime<Utc>,
}

impl From<WalletRecord> for WalletCreatedResp {
    fn from(w: WalletRecord) -> Self {
        Self {
            id: w.id,
            name: w.name,
            chain: w.chain,
            address: w.address,
            inserted_at: w.inserted_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WalletResp {
    pub id: Uuid,
    pub address: String,
    pub chain: Chain,
    pub name: String,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WalletRecord> for WalletResp {
    fn from(w: WalletRecord) -> Self {
        Self {
            id: w.id,
            address: w.address,
            chain: w.chain,
            name: w.name,
            inserted_at: w.inserted_at,
            updated_at: w.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListWalletsResp {
    pub wallets: Vec<WalletResp>,
    pub count: usize,
}

fn trace_of(ext: Option<Extension<TraceId>>) -> Option<String> {
    ext.map(|Extension(TraceId(id))| id)
}

async fn register(
    st: &AppState,
    ep: &'static str,
    trace_id: Option<String>,
    payload: Result<Json<CreateWalletReq>, JsonRejection>,
) -> Result<WalletRecord, AppError> {
    let Json(req) = payload.map_err(|e| {
        crate::metrics::count_err(ep);
        tracing::debug!("create_wallet rejected body: {}", e);
        AppError::bad_request(format!("Invalid request body: {}", e.body_text()))
            .with_trace_id(trace_id.clone())
    })?;

    let record = st
        .registry
        .add(
            req.name.as_deref().unwrap_or_default(),
            req.chain.as_deref().unwrap_or_default(),
            req.address.as_deref().unwrap_or_default(),
        )
        .await
        .map_err(|e| {
            crate::metrics::count_err(ep);
            AppError::from_registry(e, ADD_FAILED).with_trace_id(trace_id.clone())
        })?;

    crate::metrics::count_ok(ep);
    Ok(record)
}

async fn fetch_all(
    st: &AppState,
    ep: &'static str,
    trace_id: Option<String>,
) -> Result<Vec<WalletRecord>, AppError> {
    let wallets = st.registry.list().await.map_err(|e| {
        crate::metrics::count_err(ep);
        AppError::from_registry(e, LIST_FAILED).with_trace_id(trace_id)
    })?;
    crate::metrics::count_ok(ep);
    Ok(wallets)
}

#[utoipa::path(
    post,
    path = "/api/v1/wallets",
    request_body = CreateWalletReq,
    responses(
        (status = 201, description = "Wallet registered", body = WalletCreatedResp),
        (status = 400, description = "Missing field, unsupported chain or invalid address", body = crate::error_body::ErrorBodyDoc),
        (status = 409, description = "Wallet name already exists", body = crate::error_body::ErrorBodyDoc),
        (status = 500, description = "Storage failure", body = crate::error_body::ErrorBodyDoc)
    )
)]
pub async fn create_wallet(
    State(st): State<Arc<AppState>>,
    trace: Option<Extension<TraceId>>,
    payload: Result<Json<CreateWalletReq>, JsonRejection>,
) -> Result<(StatusCode, Json<WalletCreatedResp>), AppError> {
    let record = register(&st, "POST /api/v1/wallets", trace_of(trace), payload).await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/wallets",
    responses(
        (status = 200, description = "Wallets, most recently added first", body = ListWalletsResp),
        (status = 500, description = "Storage failure", body = crate::error_body::ErrorBodyDoc)
    )
)]
pub async fn list_wallets(
    State(st): State<Arc<AppState>>,
    trace: Option<Extension<TraceId>>,
) -> Result<Json<ListWalletsResp>, AppError> {
    let wallets = fetch_all(&st, "GET /api/v1/wallets", trace_of(trace)).await?;
    let wallets: Vec<WalletResp> = wallets.into_iter().map(WalletResp::from).collect();
    Ok(Json(ListWalletsResp {
        count: wallets.len(),
        wallets,
    }))
}

// -------- 旧前端接口 (/api/postwallet, /api/getwallets) --------
//
// 旧前端读取 `label`、小写 `type` 和 snake_case 时间字段；
// 失败时读取 `error`，与 AppError 响应体兼容。

#[derive(Debug, Serialize, ToSchema)]
pub struct LegacyCreatedWallet {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub chain: Chain,
    pub address: String,
    pub inserted_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LegacyCreatedResp {
    pub message: String,
    pub wallet: LegacyCreatedWallet,
}

impl From<WalletRecord> for LegacyCreatedResp {
    fn from(w: WalletRecord) -> Self {
        Self {
            message: "Wallet added successfully!".into(),
            wallet: LegacyCreatedWallet {
                id: w.id,
                name: w.name,
                chain: w.chain,
                address: w.address,
                inserted_at: w.inserted_at,
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LegacyWalletResp {
    pub id: String,
    pub address: String,
    /// 小写链名：bitcoin / ethereum / solana
    #[serde(rename = "type")]
    pub chain: String,
    pub label: String,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WalletRecord> for LegacyWalletResp {
    fn from(w: WalletRecord) -> Self {
        Self {
            id: w.id.to_string(),
            address: w.address,
            chain: w.chain.as_str().to_lowercase(),
            label: w.name,
            inserted_at: w.inserted_at,
            updated_at: w.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LegacyListResp {
    pub wallets: Vec<LegacyWalletResp>,
    pub count: usize,
}

#[utoipa::path(
    post,
    path = "/api/postwallet",
    request_body = CreateWalletReq,
    responses(
        (status = 201, description = "Wallet registered", body = LegacyCreatedResp),
        (status = 400, description = "Missing field, unsupported chain or invalid address", body = crate::error_body::ErrorBodyDoc),
        (status = 409, description = "Wallet name already exists", body = crate::error_body::ErrorBodyDoc),
        (status = 500, description = "Storage failure", body = crate::error_body::ErrorBodyDoc)
    )
)]
pub async fn post_wallet_legacy(
    State(st): State<Arc<AppState>>,
    trace: Option<Extension<TraceId>>,
    payload: Result<Json<CreateWalletReq>, JsonRejection>,
) -> Result<(StatusCode, Json<LegacyCreatedResp>), AppError> {
    let record = register(&st, "POST /api/postwallet", trace_of(trace), payload).await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

#[utoipa::path(
    get,
    path = "/api/getwallets",
    responses(
        (status = 200, description = "Wallets, most recently added first", body = LegacyListResp),
        (status = 500, description = "Storage failure", body = crate::error_body::ErrorBodyDoc)
    )
)]
pub async fn get_wallets_legacy(
    State(st): State<Arc<AppState>>,
    trace: Option<Extension<TraceId>>,
) -> Result<Json<LegacyListResp>, AppError> {
    let wallets = fetch_all(&st, "GET /api/getwallets", trace_of(trace)).await?;
    let wallets: Vec<LegacyWalletResp> =
        wallets.into_iter().map(LegacyWalletResp::from).collect();
    Ok(Json(LegacyListResp {
        count: wallets.len(),
        wallets,
    }))
}

// -------- 运维端点 --------

#[derive(Debug, Serialize, ToSchema)]
pub struct PingResp {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/api/ping",
    responses((status = 200, description = "Pong", body = PingResp))
)]
pub async fn ping() -> Json<PingResp> {
    crate::metrics::count_ok("GET /api/ping");
    Json(PingResp {
        message: "Pong!".into(),
    })
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Healthz {
    pub status: String,
    pub store_ok: bool,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/healthz",
    responses((status = 200, description = "OK or degraded", body = Healthz))
)]
pub async fn healthz(State(st): State<Arc<AppState>>) -> Json<Healthz> {
    let store_ok = st.registry.store_ok().await;
    let status = if store_ok { "ok" } else { "degraded" };
    Json(Healthz {
        status: status.into(),
        store_ok,
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::render_prometheus(),
    )
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub async fn not_found(trace: Option<Extension<TraceId>>) -> AppError {
    AppError::not_found("Not found").with_trace_id(trace_of(trace))
}
