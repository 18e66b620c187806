//! Bridge 에러 타입

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::error::ErrorKind;

/// Bridge 에러
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("bad request: {message}")]
    BadRequest { message: String },

    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("validation failed: {}", messages.join("; "))]
    ValidationFailed { messages: Vec<String> },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("core error: {0}")]
    Core(#[from] tg_core::Error),

    #[error("sql build error: {0}")]
    Sql(#[from] tg_sql::Error),
}

impl BridgeError {
    /// 쓰기 작업의 드라이버 에러 분류
    ///
    /// 제약 조건 위반(SQLSTATE 23xxx)과 데이터 예외(22xxx)는 400으로,
    /// 나머지는 500으로 보냅니다.
    pub fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let by_kind = matches!(
                db_err.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            );
            let by_state = db_err
                .code()
                .map(|code| code.starts_with("22") || code.starts_with("23"))
                .unwrap_or(false);

            if by_kind || by_state {
                return BridgeError::ValidationFailed {
                    messages: vec![db_err.message().to_string()],
                };
            }
        }
        BridgeError::Database(err)
    }

    fn parts(&self) -> (StatusCode, &'static str, String, Option<Vec<String>>) {
        match self {
            BridgeError::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", message.clone(), None)
            }
            BridgeError::Unauthorized { message } => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message.clone(), None)
            }
            BridgeError::NotFound { message } => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", message.clone(), None)
            }
            BridgeError::ValidationFailed { messages } => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_FAILED",
                "Validation failed.".to_string(),
                Some(messages.clone()),
            ),
            BridgeError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "Database operation failed".to_string(),
                None,
            ),
            BridgeError::Core(e) => {
                let status = StatusCode::from_u16(e.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, e.code(), e.public_message(), None)
            }
            BridgeError::Sql(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error.".to_string(),
                None,
            ),
        }
    }
}

/// 에러 응답 JSON
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
    #[serde(rename = "requestId", skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = self.parts();
        let request_id = crate::middleware::current_request_id();

        if status.is_server_error() {
            tracing::error!(request_id = ?request_id, status = status.as_u16(), "{:?}", self);
        } else {
            tracing::warn!(request_id = ?request_id, status = status.as_u16(), "{}", self);
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
                request_id,
            },
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
