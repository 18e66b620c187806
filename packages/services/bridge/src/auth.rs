//! 요청 인증
//!
//! 권한 검사 전에 요청 주체(`User`)를 확정합니다.
//! 자격 증명 검증은 외부 협력자의 몫이며, Bridge는 `Authenticator` 트레이트에만 의존합니다.

use async_trait::async_trait;
use axum::http::HeaderMap;

use tg_core::auth::User;

use crate::config::{AuthMode, Config};
use crate::error::{BridgeError, Result};

/// 인증기
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// 요청 헤더에서 사용자 확정
    ///
    /// 자격 증명이 없으면 `Ok(None)`을 반환하고, 호출자가 401로 응답합니다.
    async fn authenticate(&self, headers: &HeaderMap) -> Result<Option<User>>;
}

/// 설정에 맞는 인증기 생성
pub fn from_config(config: &Config) -> Box<dyn Authenticator> {
    match config.auth_mode {
        AuthMode::Static => Box::new(StaticAuthenticator::new(User::new(
            config.static_user_id,
            config.static_user_email.clone(),
        ))),
        AuthMode::Header => Box::new(HeaderAuthenticator),
    }
}

/// 고정 사용자 인증기 (개발용 스텁)
pub struct StaticAuthenticator {
    user: User,
}

impl StaticAuthenticator {
    pub fn new(user: User) -> Self {
        Self { user }
    }
}

impl Default for StaticAuthenticator {
    fn default() -> Self {
        Self::new(User::new(1, "user@example.com"))
    }
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn authenticate(&self, _headers: &HeaderMap) -> Result<Option<User>> {
        Ok(Some(self.user.clone()))
    }
}

/// 게이트웨이 헤더 인증기
///
/// 상위 프록시가 자격 증명을 검증한 뒤 넣어준 `x-user-id`, `x-user-email`을 신뢰합니다.
pub struct HeaderAuthenticator;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";

#[async_trait]
impl Authenticator for HeaderAuthenticator {
    async fn authenticate(&self, headers: &HeaderMap) -> Result<Option<User>> {
        let Some(raw_id) = headers.get(USER_ID_HEADER) else {
            return Ok(None);
        };

        let id = raw_id
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .ok_or_else(|| BridgeError::Unauthorized {
                message: "Malformed user id header".to_string(),
            })?;

        let email = headers
            .get(USER_EMAIL_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        Ok(Some(User::new(id, email)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn test_static_authenticator_always_returns_user() {
        let auth = StaticAuthenticator::default();
        let user = auth.authenticate(&HeaderMap::new()).await.unwrap().unwrap();

        assert_eq!(user, User::new(1, "user@example.com"));
    }

    #[tokio::test]
    async fn test_header_authenticator() {
        let auth = HeaderAuthenticator;

        let mut headers = HeaderMap::new();
        assert!(auth.authenticate(&headers).await.unwrap().is_none());

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("42"));
        headers.insert(USER_EMAIL_HEADER, HeaderValue::from_static("ops@example.com"));
        let user = auth.authenticate(&headers).await.unwrap().unwrap();
        assert_eq!(user, User::new(42, "ops@example.com"));
    }

    #[tokio::test]
    async fn test_header_authenticator_rejects_malformed_id() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("admin"));

        let result = HeaderAuthenticator.authenticate(&headers).await;
        assert!(matches!(result, Err(BridgeError::Unauthorized { .. })));
    }
}
