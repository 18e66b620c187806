//! 메모리 저장소 (테스트 대역)
//!
//! 권한 조인은 실제로 계산하고, 엔티티 문장은 기록만 한 뒤 미리 정한 결과를 돌려줍니다.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use tg_core::auth::UserGroupMembership;
use tg_core::permissions::{ColumnGrant, Operation, Permission};
use tg_sql::Statement;

use super::{EntityStore, ExecOutcome, PermissionStore};
use crate::error::{BridgeError, Result};

#[derive(Default)]
pub struct MemoryStore {
    permissions: Vec<Permission>,
    memberships: Vec<UserGroupMembership>,
    rows: Vec<Value>,
    outcome: ExecOutcome,
    failure: Option<Vec<String>>,
    delay: Option<Duration>,
    statements: Mutex<Vec<Statement>>,
    permission_lookups: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            outcome: ExecOutcome {
                rows_affected: 1,
                last_insert_id: 1,
            },
            ..Default::default()
        }
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permissions.push(permission);
        self
    }

    pub fn with_membership(mut self, user_id: i64, group_id: i64) -> Self {
        self.memberships
            .push(UserGroupMembership::new(user_id, group_id));
        self
    }

    pub fn with_rows(mut self, rows: Vec<Value>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_outcome(mut self, rows_affected: u64, last_insert_id: u64) -> Self {
        self.outcome = ExecOutcome {
            rows_affected,
            last_insert_id,
        };
        self
    }

    pub fn failing_with(mut self, messages: &[&str]) -> Self {
        self.failure = Some(messages.iter().map(|m| m.to_string()).collect());
        self
    }

    /// 엔티티 문장 실행 전 지연
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    /// 지금까지 받은 엔티티 문장
    pub fn statements(&self) -> Vec<Statement> {
        self.statements.lock().unwrap().clone()
    }

    /// 권한 조회 횟수
    pub fn permission_lookups(&self) -> usize {
        self.permission_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PermissionStore for MemoryStore {
    async fn column_grants(
        &self,
        user_id: i64,
        table_name: &str,
        op: Operation,
    ) -> Result<Vec<ColumnGrant>> {
        self.permission_lookups.fetch_add(1, Ordering::SeqCst);

        let mut grants: Vec<ColumnGrant> = self
            .memberships
            .iter()
            .filter(|m| m.user_id == user_id)
            .flat_map(|m| {
                self.permissions
                    .iter()
                    .filter(move |p| p.group_id == m.group_id && p.table_name == table_name)
            })
            .map(|p| p.grant_for(op))
            .collect();
        grants.sort_by(|a, b| a.column_name.cmp(&b.column_name));
        Ok(grants)
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Value>> {
        self.statements.lock().unwrap().push(statement.clone());
        self.pause().await;
        Ok(self.rows.clone())
    }

    async fn execute(&self, statement: &Statement) -> Result<ExecOutcome> {
        self.statements.lock().unwrap().push(statement.clone());
        self.pause().await;
        if let Some(messages) = &self.failure {
            return Err(BridgeError::ValidationFailed {
                messages: messages.clone(),
            });
        }
        Ok(self.outcome)
    }
}
