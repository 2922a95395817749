use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{domain::ValidationError, service::RegistryError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppErrorCode {
    // HTTP 基础错误码
    BadRequest,
    NotFound,
    MethodNotAllowed,
    Internal,

    // 业务错误码
    MissingField,
    ChainNotSupported,
    InvalidAddress,
    WalletAlreadyExists,
}

impl AppErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppErrorCode::BadRequest => "bad_request",
            AppErrorCode::NotFound => "not_found",
            AppErrorCode::MethodNotAllowed => "method_not_allowed",
            AppErrorCode::Internal => "internal",
            AppErrorCode::MissingField => "missing_field",
            AppErrorCode::ChainNotSupported => "chain_not_supported",
            AppErrorCode::InvalidAddress => "invalid_address",
            AppErrorCode::WalletAlreadyExists => "wallet_already_exists",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppError {
    pub code: AppErrorCode,
    pub message: String,
    pub status: StatusCode,
    pub trace_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    error: &'a str,
    code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<&'a str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: &self.message,
            code: self.code.as_str(),
            trace_id: self.trace_id.as_deref(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    fn new(code: AppErrorCode, status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            code,
            message: msg.into(),
            status,
            trace_id: None,
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(AppErrorCode::BadRequest, StatusCode::BAD_REQUEST, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(AppErrorCode::NotFound, StatusCode::NOT_FOUND, msg)
    }

    pub fn method_not_allowed() -> Self {
        Self::new(
            AppErrorCode::MethodNotAllowed,
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed",
        )
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(
            AppErrorCode::Internal,
            StatusCode::INTERNAL_SERVER_ERROR,
            msg,
        )
    }

    pub fn wallet_already_exists(msg: impl Into<String>) -> Self {
        Self::new(AppErrorCode::WalletAlreadyExists, StatusCode::CONFLICT, msg)
    }

    /// 设置追踪ID
    pub fn with_trace_id(mut self, trace_id: Option<String>) -> Self {
        self.trace_id = trace_id;
        self
    }

    /// 登记服务错误 → HTTP 错误
    ///
    /// 存储故障不透出内部细节，统一返回 `storage_msg`（详细错误已在服务层记录）
    pub fn from_registry(err: RegistryError, storage_msg: &str) -> Self {
        match err {
            RegistryError::Validation(e) => e.into(),
            RegistryError::DuplicateName(_) => Self::wallet_already_exists(
                "Wallet name already exists. Please choose a different name.",
            ),
            RegistryError::StorageFailure(_) => Self::internal(storage_msg),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let code = match err {
            ValidationError::MissingField(_) => AppErrorCode::MissingField,
            ValidationError::UnsupportedChain(_) => AppErrorCode::ChainNotSupported,
            ValidationError::InvalidFormat(_) => AppErrorCode::InvalidAddress,
        };
        Self::new(code, StatusCode::BAD_REQUEST, err.to_string())
    }
}
