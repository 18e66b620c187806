//! CRUD SQL 빌더
//!
//! 레지스트리의 `TableSchema`와 허용 필드를 받아 MySQL SQL을 생성합니다.
//! 식별자는 SeaQuery가 백틱으로 인용하고, 값은 모두 `?`로 바인딩합니다.

use sea_query::{Expr, Iden, MysqlQueryBuilder, Query, SimpleExpr};
use serde_json::Value;

use tg_core::id::ID_COLUMN;
use tg_core::schema::TableSchema;

use crate::error::{Error, Result};
use crate::statement::Statement;

/// 동적 테이블/컬럼 식별자
#[derive(Debug, Clone)]
struct DynIden(String);

impl Iden for DynIden {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        let _ = s.write_str(&self.0);
    }
}

/// 레지스트리에 없는 컬럼 거부
fn check_columns<'c>(
    table: &TableSchema,
    statement: &'static str,
    columns: impl IntoIterator<Item = &'c str>,
) -> Result<()> {
    let mut any = false;
    for column in columns {
        any = true;
        if !table.has_column(column) {
            return Err(Error::UnknownColumn {
                table: table.name.clone(),
                column: column.to_string(),
            });
        }
    }

    if !any {
        return Err(Error::EmptyColumns {
            statement,
            table: table.name.clone(),
        });
    }
    Ok(())
}

/// `WHERE id = ?` 조건
fn id_condition(table: &TableSchema, id: i64) -> Result<SimpleExpr> {
    if !table.has_column(ID_COLUMN) {
        return Err(Error::UnknownColumn {
            table: table.name.clone(),
            column: ID_COLUMN.to_string(),
        });
    }
    Ok(Expr::col(DynIden(ID_COLUMN.to_string())).eq(id))
}

/// SELECT 쿼리 빌더
pub struct SelectBuilder<'a> {
    table: &'a TableSchema,
}

impl<'a> SelectBuilder<'a> {
    /// 새 빌더 생성
    pub fn new(table: &'a TableSchema) -> Self {
        Self { table }
    }

    /// 전체 조회: `SELECT <columns> FROM <table>`
    ///
    /// 필터링과 페이지네이션은 하지 않습니다.
    pub fn build(&self, columns: &[String]) -> Result<Statement> {
        self.build_inner(columns, None)
    }

    /// 단건 조회: `SELECT <columns> FROM <table> WHERE id = ?`
    pub fn build_by_id(&self, columns: &[String], id: i64) -> Result<Statement> {
        self.build_inner(columns, Some(id))
    }

    fn build_inner(&self, columns: &[String], id: Option<i64>) -> Result<Statement> {
        check_columns(self.table, "SELECT", columns.iter().map(|c| c.as_str()))?;

        let mut query = Query::select();
        query
            .from(DynIden(self.table.name.clone()))
            .columns(columns.iter().map(|c| DynIden(c.clone())));

        let mut values = Vec::new();
        if let Some(id) = id {
            query.and_where(id_condition(self.table, id)?);
            values.push(Value::from(id));
        }

        let (sql, _) = query.build(MysqlQueryBuilder);
        Ok(Statement::new(sql, values))
    }
}

/// INSERT 쿼리 빌더
pub struct InsertBuilder<'a> {
    table: &'a TableSchema,
}

impl<'a> InsertBuilder<'a> {
    pub fn new(table: &'a TableSchema) -> Self {
        Self { table }
    }

    /// `INSERT INTO <table> (<columns>) VALUES (<placeholders>)` (단일 행)
    pub fn build(&self, fields: &[(String, Value)]) -> Result<Statement> {
        check_columns(self.table, "INSERT", fields.iter().map(|(c, _)| c.as_str()))?;

        let mut query = Query::insert();
        query
            .into_table(DynIden(self.table.name.clone()))
            .columns(fields.iter().map(|(c, _)| DynIden(c.clone())));
        query
            .values(fields.iter().map(|(_, v)| value_to_expr(v)))
            .map_err(|e| Error::Build {
                message: e.to_string(),
            })?;

        let (sql, _) = query.build(MysqlQueryBuilder);
        let values = fields.iter().map(|(_, v)| v.clone()).collect();
        Ok(Statement::new(sql, values))
    }
}

/// UPDATE 쿼리 빌더
pub struct UpdateBuilder<'a> {
    table: &'a TableSchema,
}

impl<'a> UpdateBuilder<'a> {
    pub fn new(table: &'a TableSchema) -> Self {
        Self { table }
    }

    /// `UPDATE <table> SET c1 = ?, c2 = ? ... WHERE id = ?`
    pub fn build(&self, fields: &[(String, Value)], id: i64) -> Result<Statement> {
        check_columns(self.table, "UPDATE", fields.iter().map(|(c, _)| c.as_str()))?;

        let mut query = Query::update();
        query.table(DynIden(self.table.name.clone()));

        // SET 절
        for (col, val) in fields {
            query.value(DynIden(col.clone()), value_to_expr(val));
        }

        // WHERE 절
        query.and_where(id_condition(self.table, id)?);

        let (sql, _) = query.build(MysqlQueryBuilder);
        let mut values: Vec<Value> = fields.iter().map(|(_, v)| v.clone()).collect();
        values.push(Value::from(id));
        Ok(Statement::new(sql, values))
    }
}

/// DELETE 쿼리 빌더
pub struct DeleteBuilder<'a> {
    table: &'a TableSchema,
}

impl<'a> DeleteBuilder<'a> {
    pub fn new(table: &'a TableSchema) -> Self {
        Self { table }
    }

    /// `DELETE FROM <table> WHERE id = ?`
    pub fn build(&self, id: i64) -> Result<Statement> {
        let mut query = Query::delete();
        query
            .from_table(DynIden(self.table.name.clone()))
            .and_where(id_condition(self.table, id)?);

        let (sql, _) = query.build(MysqlQueryBuilder);
        Ok(Statement::new(sql, vec![Value::from(id)]))
    }
}

/// serde_json::Value를 SeaQuery Expr로 변환
///
/// 실제 바인딩은 `Statement::values`로 하므로 여기서는 자리표시자 위치만 결정됩니다.
fn value_to_expr(value: &Value) -> SimpleExpr {
    match value {
        Value::Null => Expr::val(Option::<String>::None).into(),
        Value::Bool(b) => Expr::val(*b).into(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Expr::val(i).into()
            } else if let Some(u) = n.as_u64() {
                Expr::val(u).into()
            } else if let Some(f) = n.as_f64() {
                Expr::val(f).into()
            } else {
                Expr::val(n.to_string()).into()
            }
        }
        Value::String(s) => Expr::val(s.as_str()).into(),
        Value::Array(_) | Value::Object(_) => {
            // JSON 타입으로 직렬화
            Expr::val(value.to_string()).into()
        }
    }
}
