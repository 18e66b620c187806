//! 공통 에러 타입
//!
//! Tablegate 전체에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Tablegate 공통 에러
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────────
    // Schema Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("unknown entity: {name}")]
    UnknownEntity { name: String },

    #[error("invalid identifier: {name}")]
    InvalidIdentifier { name: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Permission Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("access denied: {reason}")]
    AccessDenied { reason: String },

    #[error("unsupported method: {method}")]
    UnsupportedMethod { method: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Request Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("invalid entity id: {value}")]
    InvalidEntityId { value: String },

    #[error("invalid body: {message}")]
    InvalidBody { message: String },
}

impl Error {
    /// 거부 에러 생성
    pub fn denied(reason: impl Into<String>) -> Self {
        Error::AccessDenied {
            reason: reason.into(),
        }
    }

    /// HTTP 상태 코드로 변환
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Error::InvalidEntityId { .. } | Error::InvalidBody { .. } => 400,

            // 403 Forbidden
            // 존재하지 않는 테이블도 권한 없음과 동일하게 취급합니다.
            Error::AccessDenied { .. }
            | Error::UnknownEntity { .. }
            | Error::InvalidIdentifier { .. } => 403,

            // 500 Internal Server Error
            Error::UnsupportedMethod { .. } => 500,
        }
    }

    /// 에러 코드 (클라이언트용)
    pub fn code(&self) -> &'static str {
        match self {
            Error::UnknownEntity { .. } | Error::InvalidIdentifier { .. } => "ACCESS_DENIED",
            Error::AccessDenied { .. } => "ACCESS_DENIED",
            Error::UnsupportedMethod { .. } => "INTERNAL_ERROR",
            Error::InvalidEntityId { .. } => "INVALID_ENTITY_ID",
            Error::InvalidBody { .. } => "INVALID_BODY",
        }
    }

    /// 클라이언트에 노출할 메시지
    ///
    /// 테이블 존재 여부와 내부 매핑 실패는 드러내지 않습니다.
    pub fn public_message(&self) -> String {
        match self {
            Error::UnknownEntity { .. } | Error::InvalidIdentifier { .. } => {
                "Permission denied.".to_string()
            }
            Error::UnsupportedMethod { .. } => "Internal server error.".to_string(),
            Error::AccessDenied { reason } => reason.clone(),
            other => other.to_string(),
        }
    }
}
