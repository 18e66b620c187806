//! 데이터 접근 계층
//!
//! 핸들러는 구체 드라이버가 아닌 이 모듈의 트레이트에 의존합니다.
//! 운영 환경에서는 `MySqlStore`가 두 트레이트를 모두 구현하고,
//! 테스트에서는 메모리 구현으로 대체합니다.

use async_trait::async_trait;
use serde_json::Value;

use tg_core::permissions::{ColumnGrant, Operation};
use tg_sql::Statement;

use crate::error::Result;

#[cfg(test)]
pub mod memory;
pub mod mysql;

pub use mysql::MySqlStore;

/// 권한 저장소 (읽기 전용)
#[async_trait]
pub trait PermissionStore: Send + Sync {
    /// 사용자의 그룹 소속과 조인한 컬럼 권한 행 조회
    ///
    /// `op`에 해당하는 플래그 하나만 선택합니다. 그룹 간 병합은 하지 않습니다.
    async fn column_grants(
        &self,
        user_id: i64,
        table_name: &str,
        op: Operation,
    ) -> Result<Vec<ColumnGrant>>;
}

/// 쓰기 실행 결과
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    pub rows_affected: u64,
    pub last_insert_id: u64,
}

/// 엔티티 저장소
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// SELECT 실행, 행마다 JSON 객체 하나
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Value>>;

    /// INSERT/UPDATE/DELETE 실행
    ///
    /// 제약 조건 위반은 `BridgeError::ValidationFailed`로 보고합니다.
    async fn execute(&self, statement: &Statement) -> Result<ExecOutcome>;
}
