//! Bridge 미들웨어
//!
//! 요청 ID, 인증, 권한 해석을 핸들러 앞에서 처리합니다.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Extension;
use uuid::Uuid;

use tg_core::auth::User;

use crate::error::BridgeError;
use crate::state::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

tokio::task_local! {
    static REQUEST_ID: String;
}

pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(|id| id.clone()).ok()
}

pub async fn request_id(req: Request, next: Next) -> Response {
    let id = Uuid::new_v4().to_string();
    let mut resp = REQUEST_ID.scope(id.clone(), async move { next.run(req).await }).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        resp.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    resp
}

/// 인증
///
/// 확정된 `User`를 요청 확장에 넣습니다.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    match state.authenticator.authenticate(req.headers()).await {
        Ok(Some(user)) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Ok(None) => BridgeError::Unauthorized {
            message: "Unauthorized".to_string(),
        }
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// 권한 해석
///
/// 엔티티 이름을 레지스트리로 검증한 뒤 해석 결과를 요청 확장에 넣습니다.
/// 권한 행이 하나도 없으면 핸들러까지 가지 않습니다.
pub async fn check_permission(
    State(state): State<Arc<AppState>>,
    Path(params): Path<HashMap<String, String>>,
    Extension(user): Extension<User>,
    mut req: Request,
    next: Next,
) -> Response {
    let entity_type = params.get("entity_type").map(String::as_str).unwrap_or_default();

    let table = match state.schema.resolve_entity(entity_type) {
        Ok(table) => table,
        Err(e) => return BridgeError::from(e).into_response(),
    };

    let resolved = match state.resolver.resolve(&user, &table.name, req.method()).await {
        Ok(resolved) => resolved,
        Err(e) => return e.into_response(),
    };

    if resolved.is_empty() {
        return BridgeError::from(tg_core::Error::denied("Permission denied.")).into_response();
    }

    req.extensions_mut().insert(resolved);
    next.run(req).await
}
