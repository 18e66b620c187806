//! 권한 해석기
//!
//! 사용자와 대상 테이블, HTTP 메서드로부터 요청 단위 권한 집합을 만듭니다.
//! 요청마다 저장소를 다시 조회하며 캐시하지 않습니다.

use std::sync::Arc;

use axum::http::Method;

use tg_core::auth::User;
use tg_core::permissions::{Operation, ResolvedPermissions};

use crate::error::Result;
use crate::store::PermissionStore;

/// 권한 해석기
pub struct PermissionResolver {
    store: Arc<dyn PermissionStore>,
}

impl PermissionResolver {
    /// 새 해석기 생성
    pub fn new(store: Arc<dyn PermissionStore>) -> Self {
        Self { store }
    }

    /// 권한 해석
    ///
    /// 매핑되지 않는 메서드는 저장소를 조회하기 전에 실패합니다.
    /// 빈 결과는 그대로 돌려주며, 거부 여부는 호출자가 판단합니다.
    pub async fn resolve(
        &self,
        user: &User,
        table_name: &str,
        method: &Method,
    ) -> Result<ResolvedPermissions> {
        let op = Operation::from_method(method.as_str()).ok_or_else(|| {
            tg_core::Error::UnsupportedMethod {
                method: method.to_string(),
            }
        })?;

        let grants = self.store.column_grants(user.id, table_name, op).await?;
        let resolved = ResolvedPermissions::merge(op, grants);

        tracing::debug!(
            user_id = user.id,
            table = table_name,
            operation = %op,
            columns = resolved.columns.len(),
            "resolved permissions"
        );

        Ok(resolved)
    }
}
