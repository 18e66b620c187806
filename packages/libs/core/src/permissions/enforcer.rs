//! 접근 제어기
//!
//! 해석된 권한과 요청 본문으로부터 작업별 허용 필드 집합을 계산합니다.
//!
//! - create/update: 요청 필드 ∩ 허용 컬럼. 비어 있으면 거부 (부분 적용 없음)
//! - read: 요청과 무관하게 읽기 허용 컬럼 전체. 비어 있으면 거부
//! - delete: 모든 권한 행이 삭제를 허용해야 함 (행 단위, all-or-nothing)

use serde_json::{Map, Value};

use super::context::ResolvedPermissions;
use super::policy::Operation;
use crate::error::{Error, Result};
use crate::schema::TableSchema;

/// 접근 제어기
///
/// 스키마에 없는 권한 컬럼은 SQL에 들어갈 수 없으므로 create/read/update에서 무시합니다.
pub struct AccessEnforcer<'a> {
    permissions: &'a ResolvedPermissions,
    table: &'a TableSchema,
}

impl<'a> AccessEnforcer<'a> {
    /// 새 제어기 생성
    pub fn new(permissions: &'a ResolvedPermissions, table: &'a TableSchema) -> Self {
        Self { permissions, table }
    }

    /// INSERT 허용 필드 (본문 값 포함)
    pub fn creatable_fields(&self, body: &Map<String, Value>) -> Result<Vec<(String, Value)>> {
        let fields = self.requested_fields(Operation::Create, body);
        if fields.is_empty() {
            return Err(Error::denied("Invalid post body."));
        }
        Ok(fields)
    }

    /// SELECT 허용 컬럼
    pub fn readable_columns(&self) -> Result<Vec<String>> {
        self.expect_operation(Operation::Read)?;

        let columns: Vec<String> = self
            .permissions
            .granted_columns()
            .filter(|c| self.table.has_column(c))
            .map(|c| c.to_string())
            .collect();

        if columns.is_empty() {
            return Err(Error::denied(
                "User does not have read permission for any column.",
            ));
        }
        Ok(columns)
    }

    /// UPDATE 허용 필드 (본문 값 포함)
    pub fn updatable_fields(&self, body: &Map<String, Value>) -> Result<Vec<(String, Value)>> {
        let fields = self.requested_fields(Operation::Update, body);
        if fields.is_empty() {
            return Err(Error::denied(
                "User does not have permission to update any of these fields.",
            ));
        }
        Ok(fields)
    }

    /// DELETE 허용 여부
    pub fn ensure_deletable(&self) -> Result<()> {
        self.expect_operation(Operation::Delete)?;

        if !self.permissions.all_granted() {
            return Err(Error::denied(
                "User does not have delete permission for all columns.",
            ));
        }
        Ok(())
    }

    fn requested_fields(&self, op: Operation, body: &Map<String, Value>) -> Vec<(String, Value)> {
        if self.permissions.operation != op {
            return Vec::new();
        }

        body.iter()
            .filter(|(field, _)| self.table.has_column(field) && self.permissions.is_granted(field))
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect()
    }

    fn expect_operation(&self, op: Operation) -> Result<()> {
        if self.permissions.operation != op {
            return Err(Error::denied(format!(
                "permissions resolved for {} cannot authorize {}",
                self.permissions.operation, op
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::ColumnGrant;
    use serde_json::json;

    fn widgets() -> TableSchema {
        TableSchema::new("widgets")
            .with_column("id")
            .with_column("name")
            .with_column("secret")
            .with_column("price")
    }

    fn resolved(op: Operation, grants: &[(&str, bool)]) -> ResolvedPermissions {
        ResolvedPermissions::merge(
            op,
            grants.iter().map(|(c, g)| ColumnGrant::new(*c, *g)),
        )
    }

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_create_drops_unpermitted_fields() {
        let table = widgets();
        let perms = resolved(Operation::Create, &[("name", true), ("secret", false)]);
        let enforcer = AccessEnforcer::new(&perms, &table);

        let fields = enforcer
            .creatable_fields(&body(json!({"name": "a", "secret": "x"})))
            .unwrap();

        assert_eq!(fields, vec![("name".to_string(), json!("a"))]);
    }

    #[test]
    fn test_create_with_only_unpermitted_fields_is_denied() {
        let table = widgets();
        let perms = resolved(Operation::Create, &[("name", true), ("secret", false)]);
        let enforcer = AccessEnforcer::new(&perms, &table);

        let result = enforcer.creatable_fields(&body(json!({"secret": "x", "unknown": 1})));
        assert!(matches!(result, Err(Error::AccessDenied { .. })));

        let result = enforcer.creatable_fields(&Map::new());
        assert!(matches!(result, Err(Error::AccessDenied { .. })));
    }

    #[test]
    fn test_read_ignores_columns_missing_from_schema() {
        let table = widgets();
        let perms = resolved(
            Operation::Read,
            &[("name", true), ("secret", false), ("dropped_column", true)],
        );
        let enforcer = AccessEnforcer::new(&perms, &table);

        assert_eq!(enforcer.readable_columns().unwrap(), vec!["name"]);
    }

    #[test]
    fn test_read_without_any_readable_column_is_denied() {
        let table = widgets();
        let perms = resolved(Operation::Read, &[("name", false), ("secret", false)]);
        let enforcer = AccessEnforcer::new(&perms, &table);

        assert!(matches!(
            enforcer.readable_columns(),
            Err(Error::AccessDenied { .. })
        ));
    }

    #[test]
    fn test_update_intersects_body_with_permissions() {
        let table = widgets();
        let perms = resolved(Operation::Update, &[("name", true), ("price", true), ("secret", false)]);
        let enforcer = AccessEnforcer::new(&perms, &table);

        let fields = enforcer
            .updatable_fields(&body(json!({"price": 10, "secret": "x"})))
            .unwrap();
        assert_eq!(fields, vec![("price".to_string(), json!(10))]);

        assert!(enforcer
            .updatable_fields(&body(json!({"secret": "x"})))
            .is_err());
    }

    #[test]
    fn test_delete_is_all_or_nothing() {
        let table = widgets();

        let all = resolved(Operation::Delete, &[("name", true), ("secret", true), ("price", true)]);
        assert!(AccessEnforcer::new(&all, &table).ensure_deletable().is_ok());

        let one_missing =
            resolved(Operation::Delete, &[("name", true), ("secret", false), ("price", true)]);
        assert!(matches!(
            AccessEnforcer::new(&one_missing, &table).ensure_deletable(),
            Err(Error::AccessDenied { .. })
        ));
    }

    #[test]
    fn test_mismatched_operation_is_denied() {
        let table = widgets();
        let perms = resolved(Operation::Read, &[("name", true)]);
        let enforcer = AccessEnforcer::new(&perms, &table);

        assert!(enforcer.creatable_fields(&body(json!({"name": "a"}))).is_err());
        assert!(enforcer.ensure_deletable().is_err());
    }
}
