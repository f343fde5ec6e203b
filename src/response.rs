use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Wire shape for every error response: `{"error": "<message>"}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub is_operational: bool,
}

impl AppError {
    pub fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
            is_operational: true,
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.to_string(),
            is_operational: true,
        }
    }

    pub fn conflict(message: &str) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.to_string(),
            is_operational: true,
        }
    }

    pub fn internal(message: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
            is_operational: false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // 非操作性错误（存储故障等）不向客户端暴露内部细节
        let exposed_message = if self.is_operational {
            self.message.clone()
        } else {
            "Internal server error.".to_string()
        };

        if self.is_operational {
            tracing::warn!(status = %self.status, error = %self.message, "API error");
        } else {
            tracing::error!(status = %self.status, error = %self.message, "Internal API error");
        }

        (
            self.status,
            Json(ErrorBody {
                error: exposed_message,
            }),
        )
            .into_response()
    }
}

// StoreError 转换映射：
// - NotFound -> 404，Conflict -> 409，Validation -> 400（可安全暴露消息）
// - 其他错误 -> 500（is_operational=false，IntoResponse 中会替换为通用消息）
impl From<crate::store::StoreError> for AppError {
    fn from(value: crate::store::StoreError) -> Self {
        match &value {
            crate::store::StoreError::NotFound { entity, .. } => {
                AppError::not_found(&format!("{entity} not found."))
            }
            crate::store::StoreError::Conflict { entity, .. } => {
                AppError::conflict(&format!("{entity} already exists."))
            }
            crate::store::StoreError::Validation(msg) => AppError::bad_request(msg),
            _ => AppError::internal(&value.to_string()),
        }
    }
}
