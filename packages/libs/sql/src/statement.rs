//! 생성된 SQL 문장
//!
//! SQL 텍스트와 `?` 자리표시자 순서대로 정렬된 바인딩 값을 담습니다.
//! 값은 `serde_json::Value`로 유지하고, 실행 계층이 드라이버 타입으로 바인딩합니다.

use serde_json::Value;

/// 파라미터화된 SQL 문장
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// SQL 텍스트
    pub sql: String,

    /// 바인딩 값 (자리표시자 순서)
    pub values: Vec<Value>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            values,
        }
    }

    /// SQL 텍스트의 `?` 자리표시자 수
    ///
    /// 식별자는 레지스트리 규칙상 `?`를 포함할 수 없으므로 단순 계수로 충분합니다.
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)
    }
}
