//! 권한 정책 정의
//!
//! `permissions` 테이블의 구조와 CRUD 작업 타입을 정의합니다.

use serde::{Deserialize, Serialize};

/// CRUD 작업 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    /// HTTP 메서드에서 작업 매핑
    ///
    /// GET→read, POST→create, PUT→update, DELETE→delete.
    /// 그 외 메서드(HEAD, PATCH 등)는 매핑되지 않습니다.
    pub fn from_method(method: &str) -> Option<Self> {
        match method.to_ascii_uppercase().as_str() {
            "GET" => Some(Operation::Read),
            "POST" => Some(Operation::Create),
            "PUT" => Some(Operation::Update),
            "DELETE" => Some(Operation::Delete),
            _ => None,
        }
    }

    /// 문자열로 변환
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// `permissions` 테이블의 플래그 컬럼 이름
    pub fn permission_column(&self) -> &'static str {
        match self {
            Operation::Create => "create_permission",
            Operation::Read => "read_permission",
            Operation::Update => "update_permission",
            Operation::Delete => "delete_permission",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 권한 행 (`permissions` 테이블)
///
/// (group_id, table_name, column_name) 당 최대 한 행입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub group_id: i64,
    pub table_name: String,
    pub column_name: String,
    #[serde(default)]
    pub create_permission: bool,
    #[serde(default)]
    pub read_permission: bool,
    #[serde(default)]
    pub update_permission: bool,
    #[serde(default)]
    pub delete_permission: bool,
}

impl Permission {
    /// 특정 작업의 플래그
    pub fn allows(&self, op: Operation) -> bool {
        match op {
            Operation::Create => self.create_permission,
            Operation::Read => self.read_permission,
            Operation::Update => self.update_permission,
            Operation::Delete => self.delete_permission,
        }
    }

    /// 현재 작업에 대한 조인 결과 행으로 투영
    pub fn grant_for(&self, op: Operation) -> ColumnGrant {
        ColumnGrant {
            column_name: self.column_name.clone(),
            granted: self.allows(op),
        }
    }
}

/// 권한 조회 결과 행
///
/// `permissions ⋈ users_user_groups` 조인에서 현재 작업의 플래그 하나만 선택한 행입니다.
/// 여러 그룹에 속한 사용자는 같은 컬럼에 대해 여러 행을 받을 수 있습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnGrant {
    pub column_name: String,
    pub granted: bool,
}

impl ColumnGrant {
    pub fn new(column_name: impl Into<String>, granted: bool) -> Self {
        Self {
            column_name: column_name.into(),
            granted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_from_method() {
        assert_eq!(Operation::from_method("GET"), Some(Operation::Read));
        assert_eq!(Operation::from_method("post"), Some(Operation::Create));
        assert_eq!(Operation::from_method("PUT"), Some(Operation::Update));
        assert_eq!(Operation::from_method("DELETE"), Some(Operation::Delete));
        assert_eq!(Operation::from_method("PATCH"), None);
        assert_eq!(Operation::from_method("HEAD"), None);
        assert_eq!(Operation::from_method("OPTIONS"), None);
    }

    #[test]
    fn test_permission_column() {
        assert_eq!(Operation::Read.permission_column(), "read_permission");
        assert_eq!(Operation::Delete.permission_column(), "delete_permission");
    }

    #[test]
    fn test_permission_grant_projection() {
        let row = Permission {
            group_id: 1,
            table_name: "widgets".to_string(),
            column_name: "name".to_string(),
            create_permission: true,
            read_permission: true,
            update_permission: false,
            delete_permission: false,
        };

        assert_eq!(row.grant_for(Operation::Read), ColumnGrant::new("name", true));
        assert_eq!(row.grant_for(Operation::Update), ColumnGrant::new("name", false));
    }

    #[test]
    fn test_permission_deserialize_defaults() {
        let json = r#"{"group_id": 2, "table_name": "widgets", "column_name": "price", "read_permission": true}"#;
        let row: Permission = serde_json::from_str(json).unwrap();

        assert!(row.read_permission);
        assert!(!row.create_permission);
        assert!(!row.delete_permission);
    }
}
