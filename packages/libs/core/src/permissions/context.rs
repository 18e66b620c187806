//! 요청 단위 권한 컨텍스트
//!
//! 한 사용자, 한 테이블, 한 작업에 대해 해석된 컬럼 권한 집합입니다.
//! 요청 시작 시 계산되어 request extension에 저장되고, 요청 종료와 함께 버려집니다.

use serde::{Deserialize, Serialize};

use super::policy::{ColumnGrant, Operation};

/// 컬럼 권한 (권한 조회 결과)
///
/// 현재 작업의 플래그만 채워지고 나머지는 `None`입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPermission {
    pub column_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_permission: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_permission: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_permission: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_permission: Option<bool>,
}

impl ColumnPermission {
    /// 특정 작업 플래그만 채운 컬럼 권한 생성
    pub fn for_operation(column_name: impl Into<String>, op: Operation, granted: bool) -> Self {
        let mut permission = Self {
            column_name: column_name.into(),
            create_permission: None,
            read_permission: None,
            update_permission: None,
            delete_permission: None,
        };
        *permission.flag_mut(op) = Some(granted);
        permission
    }

    /// 특정 작업 허용 여부 (값이 없으면 거부)
    pub fn allows(&self, op: Operation) -> bool {
        let flag = match op {
            Operation::Create => self.create_permission,
            Operation::Read => self.read_permission,
            Operation::Update => self.update_permission,
            Operation::Delete => self.delete_permission,
        };
        flag.unwrap_or(false)
    }

    fn flag_mut(&mut self, op: Operation) -> &mut Option<bool> {
        match op {
            Operation::Create => &mut self.create_permission,
            Operation::Read => &mut self.read_permission,
            Operation::Update => &mut self.update_permission,
            Operation::Delete => &mut self.delete_permission,
        }
    }
}

/// 해석된 권한 집합
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPermissions {
    /// 현재 요청의 작업
    pub operation: Operation,

    /// 컬럼별 권한 (컬럼당 하나)
    pub columns: Vec<ColumnPermission>,
}

impl ResolvedPermissions {
    /// 조인 결과 행들을 컬럼 단위로 병합
    ///
    /// 여러 그룹이 같은 컬럼에 권한을 주면 OR로 합칩니다 (하나라도 허용이면 허용).
    /// 컬럼 순서는 처음 등장한 순서를 유지합니다.
    pub fn merge(operation: Operation, grants: impl IntoIterator<Item = ColumnGrant>) -> Self {
        let mut columns: Vec<ColumnPermission> = Vec::new();

        for grant in grants {
            match columns
                .iter_mut()
                .find(|c| c.column_name == grant.column_name)
            {
                Some(existing) => {
                    let merged = existing.allows(operation) || grant.granted;
                    *existing.flag_mut(operation) = Some(merged);
                }
                None => columns.push(ColumnPermission::for_operation(
                    grant.column_name,
                    operation,
                    grant.granted,
                )),
            }
        }

        Self { operation, columns }
    }

    /// 권한 행이 하나도 없는지
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// 현재 작업이 허용된 컬럼 이름들
    pub fn granted_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|c| c.allows(self.operation))
            .map(|c| c.column_name.as_str())
    }

    /// 특정 컬럼의 현재 작업 허용 여부
    pub fn is_granted(&self, column: &str) -> bool {
        self.columns
            .iter()
            .any(|c| c.column_name == column && c.allows(self.operation))
    }

    /// 모든 컬럼이 현재 작업을 허용하는지 (빈 집합은 false)
    pub fn all_granted(&self) -> bool {
        !self.columns.is_empty() && self.columns.iter().all(|c| c.allows(self.operation))
    }
}
