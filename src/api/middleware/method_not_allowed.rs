//! 405 响应统一为 JSON 错误体
//!
//! axum 对已知路由的错误方法返回空 body 的 405，这里改写成 `{error, code}`，
//! 并保留 Allow 头。需放在 trace_id 中间件内层。

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{api::middleware::trace_id::extract_trace_id, error::AppError};

pub async fn json_method_not_allowed(req: Request, next: Next) -> Response {
    let trace_id = extract_trace_id(&req);
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    tracing::debug!(%method, %path, "method not allowed");
    let allow = response.headers().get(header::ALLOW).cloned();
    let mut json = AppError::method_not_allowed()
        .with_trace_id(trace_id)
        .into_response();
    if let Some(allow) = allow {
        json.headers_mut().insert(header::ALLOW, allow);
    }
    json
}
