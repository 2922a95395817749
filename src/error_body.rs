use serde::Serialize;
use utoipa::ToSchema;

/// 错误响应体（仅用于 OpenAPI 文档）
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBodyDoc {
    pub error: String,
    pub code: String,
    pub trace_id: Option<String>,
}
