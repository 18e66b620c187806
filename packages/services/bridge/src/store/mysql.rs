//! MySQL 저장소 (sqlx)

use async_trait::async_trait;
use serde_json::Value;
use sqlx::mysql::{MySqlArguments, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::query::Query;
use sqlx::{Column, FromRow, MySql, Row, TypeInfo};

use tg_core::permissions::{ColumnGrant, Operation};
use tg_core::schema::SchemaRegistry;
use tg_sql::Statement;

use super::{EntityStore, ExecOutcome, PermissionStore};
use crate::config::Config;
use crate::error::{BridgeError, Result};

/// MySQL 저장소
///
/// 프로세스 시작 시 한 번 생성되어 모든 요청이 공유합니다.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

#[derive(Debug, FromRow)]
struct GrantRow {
    column_name: String,
    granted: Option<bool>,
}

#[derive(Debug, FromRow)]
struct CatalogRow {
    table_name: String,
    column_name: String,
}

impl MySqlStore {
    /// 커넥션 풀 생성
    pub async fn connect(config: &Config) -> std::result::Result<Self, sqlx::Error> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.db_acquire_timeout())
            .connect_with(config.database.connect_options())
            .await?;
        Ok(Self::new(pool))
    }

    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// 현재 데이터베이스의 테이블/컬럼 카탈로그로 레지스트리 생성
    pub async fn load_schema(&self) -> Result<SchemaRegistry> {
        let rows: Vec<CatalogRow> = sqlx::query_as(
            "SELECT CAST(TABLE_NAME AS CHAR) AS table_name, \
                    CAST(COLUMN_NAME AS CHAR) AS column_name \
             FROM information_schema.columns \
             WHERE table_schema = DATABASE()",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(SchemaRegistry::from_columns(
            rows.into_iter().map(|r| (r.table_name, r.column_name)),
        ))
    }
}

/// 권한 조회 SQL
///
/// 플래그 컬럼 이름은 고정 매핑(`Operation::permission_column`)에서만 옵니다.
fn grants_query(op: Operation) -> String {
    format!(
        "SELECT p.column_name AS column_name, p.{} AS granted \
         FROM permissions p \
         JOIN users_user_groups ug ON p.group_id = ug.group_id \
         WHERE ug.user_id = ? AND p.table_name = ? \
         ORDER BY p.column_name",
        op.permission_column()
    )
}

#[async_trait]
impl PermissionStore for MySqlStore {
    async fn column_grants(
        &self,
        user_id: i64,
        table_name: &str,
        op: Operation,
    ) -> Result<Vec<ColumnGrant>> {
        let sql = grants_query(op);
        let rows: Vec<GrantRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .bind(table_name)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| ColumnGrant::new(r.column_name, r.granted.unwrap_or(false)))
            .collect())
    }
}

#[async_trait]
impl EntityStore for MySqlStore {
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Value>> {
        let rows = bind_values(sqlx::query(&statement.sql), &statement.values)
            .fetch_all(&self.pool)
            .await
            .map_err(BridgeError::Database)?;
        Ok(rows_to_json(rows))
    }

    async fn execute(&self, statement: &Statement) -> Result<ExecOutcome> {
        let result = bind_values(sqlx::query(&statement.sql), &statement.values)
            .execute(&self.pool)
            .await
            .map_err(BridgeError::from_write)?;

        Ok(ExecOutcome {
            rows_affected: result.rows_affected(),
            last_insert_id: result.last_insert_id(),
        })
    }
}

fn bind_values<'q>(
    mut query: Query<'q, MySql, MySqlArguments>,
    values: &[Value],
) -> Query<'q, MySql, MySqlArguments> {
    for value in values {
        match value {
            Value::Null => {
                let v: Option<String> = None;
                query = query.bind(v);
            }
            Value::Bool(b) => query = query.bind(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    query = query.bind(i);
                } else if let Some(u) = n.as_u64() {
                    query = query.bind(u);
                } else if let Some(f) = n.as_f64() {
                    query = query.bind(f);
                } else {
                    query = query.bind(n.to_string());
                }
            }
            Value::String(s) => query = query.bind(s.clone()),
            Value::Array(_) | Value::Object(_) => {
                query = query.bind(sqlx::types::Json(value.clone()));
            }
        }
    }
    query
}

fn rows_to_json(rows: Vec<MySqlRow>) -> Vec<Value> {
    rows.into_iter().map(row_to_json).collect()
}

/// 컬럼 타입별 디코딩 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnDecoder {
    Bool,
    Unsigned,
    Signed,
    Float,
    Double,
    Decimal,
    Json,
    Timestamp,
    DateTime,
    Date,
    Time,
    Bytes,
    Text,
}

/// sqlx `TypeInfo::name()` 기준 매핑
fn decoder_for(type_name: &str) -> ColumnDecoder {
    match type_name.to_ascii_uppercase().as_str() {
        "BOOLEAN" => ColumnDecoder::Bool,
        // YEAR와 BIT는 문자열로 디코딩할 수 없음
        "YEAR" | "BIT" => ColumnDecoder::Unsigned,
        t if t.ends_with("UNSIGNED") => ColumnDecoder::Unsigned,
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => ColumnDecoder::Signed,
        "FLOAT" => ColumnDecoder::Float,
        "DOUBLE" => ColumnDecoder::Double,
        "DECIMAL" => ColumnDecoder::Decimal,
        "JSON" => ColumnDecoder::Json,
        "TIMESTAMP" => ColumnDecoder::Timestamp,
        "DATETIME" => ColumnDecoder::DateTime,
        "DATE" => ColumnDecoder::Date,
        "TIME" => ColumnDecoder::Time,
        "SET" | "BLOB" | "BINARY" | "VARBINARY" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
            ColumnDecoder::Bytes
        }
        _ => ColumnDecoder::Text,
    }
}

fn decode_column(
    row: &MySqlRow,
    name: &str,
    decoder: ColumnDecoder,
) -> std::result::Result<Option<Value>, sqlx::Error> {
    let value = match decoder {
        ColumnDecoder::Bool => row.try_get::<Option<bool>, _>(name)?.map(Value::Bool),
        ColumnDecoder::Unsigned => row
            .try_get::<Option<u64>, _>(name)?
            .map(|v| Value::Number(v.into())),
        ColumnDecoder::Signed => row
            .try_get::<Option<i64>, _>(name)?
            .map(|v| Value::Number(v.into())),
        ColumnDecoder::Float => row
            .try_get::<Option<f32>, _>(name)?
            .and_then(|v| serde_json::Number::from_f64(f64::from(v)))
            .map(Value::Number),
        ColumnDecoder::Double => row
            .try_get::<Option<f64>, _>(name)?
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number),
        // 정밀도 보존을 위해 문자열로 반환
        ColumnDecoder::Decimal => row
            .try_get::<Option<rust_decimal::Decimal>, _>(name)?
            .map(|v| Value::String(v.to_string())),
        ColumnDecoder::Json => row.try_get::<Option<serde_json::Value>, _>(name)?,
        ColumnDecoder::Timestamp => row
            .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name)?
            .map(|v| Value::String(v.to_rfc3339())),
        ColumnDecoder::DateTime => row
            .try_get::<Option<chrono::NaiveDateTime>, _>(name)?
            .map(|v| Value::String(v.format("%Y-%m-%dT%H:%M:%S%.f").to_string())),
        ColumnDecoder::Date => row
            .try_get::<Option<chrono::NaiveDate>, _>(name)?
            .map(|v| Value::String(v.to_string())),
        ColumnDecoder::Time => row
            .try_get::<Option<chrono::NaiveTime>, _>(name)?
            .map(|v| Value::String(v.to_string())),
        ColumnDecoder::Bytes => row
            .try_get::<Option<Vec<u8>>, _>(name)?
            .map(bytes_to_json),
        ColumnDecoder::Text => row.try_get::<Option<String>, _>(name)?.map(Value::String),
    };
    Ok(value)
}

/// SET 값과 텍스트 BLOB은 UTF-8 문자열로, 그 외 바이너리는 손실 변환
fn bytes_to_json(bytes: Vec<u8>) -> Value {
    match String::from_utf8(bytes) {
        Ok(text) => Value::String(text),
        Err(e) => Value::String(String::from_utf8_lossy(e.as_bytes()).into_owned()),
    }
}

fn row_to_json(row: MySqlRow) -> Value {
    let mut obj = serde_json::Map::new();
    for column in row.columns() {
        let name = column.name();
        let type_name = column.type_info().name();

        let value = match decode_column(&row, name, decoder_for(type_name)) {
            Ok(value) => value.unwrap_or(Value::Null),
            Err(e) => {
                tracing::warn!(
                    column = name,
                    column_type = type_name,
                    error = %e,
                    "column decode failed, returning null"
                );
                Value::Null
            }
        };

        obj.insert(name.to_string(), value);
    }
    Value::Object(obj)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grants_query_selects_single_flag() {
        let sql = grants_query(Operation::Read);

        assert!(sql.contains("p.read_permission AS granted"));
        assert!(!sql.contains("create_permission"));
        assert!(sql.contains("WHERE ug.user_id = ? AND p.table_name = ?"));

        let sql = grants_query(Operation::Delete);
        assert!(sql.contains("p.delete_permission AS granted"));
    }

    #[test]
    fn test_decoder_for_numeric_types() {
        assert_eq!(decoder_for("YEAR"), ColumnDecoder::Unsigned);
        assert_eq!(decoder_for("BIT"), ColumnDecoder::Unsigned);
        assert_eq!(decoder_for("INT UNSIGNED"), ColumnDecoder::Unsigned);
        assert_eq!(decoder_for("BIGINT"), ColumnDecoder::Signed);
        assert_eq!(decoder_for("DECIMAL"), ColumnDecoder::Decimal);
        assert_eq!(decoder_for("BOOLEAN"), ColumnDecoder::Bool);
    }

    #[test]
    fn test_decoder_for_text_and_binary_types() {
        assert_eq!(decoder_for("SET"), ColumnDecoder::Bytes);
        assert_eq!(decoder_for("LONGBLOB"), ColumnDecoder::Bytes);
        assert_eq!(decoder_for("VARCHAR"), ColumnDecoder::Text);
        assert_eq!(decoder_for("ENUM"), ColumnDecoder::Text);
        assert_eq!(decoder_for("datetime"), ColumnDecoder::DateTime);
    }

    #[test]
    fn test_bytes_to_json() {
        assert_eq!(bytes_to_json(b"red,blue".to_vec()), Value::from("red,blue"));
        assert_eq!(bytes_to_json(vec![0x61, 0xff]), Value::from("a\u{fffd}"));
    }
}
