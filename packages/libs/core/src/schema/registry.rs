//! 스키마 레지스트리
//!
//! Bridge가 노출할 수 있는 테이블과 컬럼의 최종 허용 목록입니다.
//! SQL 빌더는 이 레지스트리의 `TableSchema`만 입력으로 받습니다.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::ident::{ensure_identifier, is_valid_identifier};
use crate::error::{Error, Result};

/// 테이블 스키마 (허용된 컬럼 집합)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// 테이블 이름
    pub name: String,

    /// 컬럼 이름 집합
    pub columns: BTreeSet<String>,
}

impl TableSchema {
    /// 빈 테이블 스키마 생성
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: BTreeSet::new(),
        }
    }

    /// 컬럼 추가 (builder)
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.columns.insert(column.into());
        self
    }

    /// 컬럼 존재 여부
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(column)
    }
}

/// 스키마 레지스트리
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaRegistry {
    /// 테이블 맵 (테이블 이름 -> 테이블 스키마)
    tables: HashMap<String, TableSchema>,
}

impl SchemaRegistry {
    /// 빈 레지스트리 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// (테이블, 컬럼) 쌍에서 레지스트리 생성
    ///
    /// 식별자 규칙을 벗어난 이름은 노출 대상에서 제외합니다.
    pub fn from_columns<I, T, C>(columns: I) -> Self
    where
        I: IntoIterator<Item = (T, C)>,
        T: Into<String>,
        C: Into<String>,
    {
        let mut registry = Self::new();
        for (table, column) in columns {
            let (table, column) = (table.into(), column.into());
            if !is_valid_identifier(&table) || !is_valid_identifier(&column) {
                continue;
            }
            registry
                .tables
                .entry(table.clone())
                .or_insert_with(|| TableSchema::new(table))
                .columns
                .insert(column);
        }
        registry
    }

    /// 테이블 추가
    pub fn add_table(&mut self, table: TableSchema) {
        self.tables.insert(table.name.clone(), table);
    }

    /// 테이블 조회
    pub fn get_table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }

    /// 테이블 존재 여부
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// 요청된 엔티티 타입을 검증하고 테이블 스키마 반환
    pub fn resolve_entity(&self, entity_type: &str) -> Result<&TableSchema> {
        ensure_identifier(entity_type)?;
        self.get_table(entity_type).ok_or_else(|| Error::UnknownEntity {
            name: entity_type.to_string(),
        })
    }

    /// 테이블 수
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_columns_groups_by_table() {
        let registry = SchemaRegistry::from_columns(vec![
            ("widgets", "id"),
            ("widgets", "name"),
            ("widgets", "secret"),
            ("gadgets", "id"),
        ]);

        assert_eq!(registry.len(), 2);
        let widgets = registry.get_table("widgets").unwrap();
        assert!(widgets.has_column("name"));
        assert!(widgets.has_column("secret"));
        assert!(!widgets.has_column("price"));
        assert!(registry.has_table("gadgets"));
    }

    #[test]
    fn test_from_columns_skips_unsafe_names() {
        let registry = SchemaRegistry::from_columns(vec![
            ("widgets", "name"),
            ("widgets", "bad column"),
            ("odd-table", "id"),
        ]);

        assert_eq!(registry.len(), 1);
        assert!(!registry.get_table("widgets").unwrap().has_column("bad column"));
        assert!(!registry.has_table("odd-table"));
    }

    #[test]
    fn test_resolve_entity() {
        let mut registry = SchemaRegistry::new();
        registry.add_table(TableSchema::new("widgets").with_column("name"));

        assert_eq!(registry.resolve_entity("widgets").unwrap().name, "widgets");
        assert!(matches!(
            registry.resolve_entity("gadgets"),
            Err(Error::UnknownEntity { .. })
        ));
        assert!(matches!(
            registry.resolve_entity("widgets;--"),
            Err(Error::InvalidIdentifier { .. })
        ));
    }
}
