//! SQL 빌더 에러

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// SQL 빌더 에러
///
/// 호출자가 접근 제어기를 거쳤다면 발생하지 않아야 하는 프로그래밍 오류입니다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("no columns given for {statement} on table '{table}'")]
    EmptyColumns {
        statement: &'static str,
        table: String,
    },

    #[error("unknown column '{column}' on table '{table}'")]
    UnknownColumn { table: String, column: String },

    #[error("query build error: {message}")]
    Build { message: String },
}
