//! 테이블/컬럼 허용 목록
//!
//! # 개요
//!
//! 테이블 이름과 컬럼 이름은 SQL 텍스트에 직접 삽입되므로,
//! 삽입 전에 반드시 이 모듈의 레지스트리와 식별자 규칙으로 검증합니다.
//! 레지스트리는 Bridge 시작 시 DB 카탈로그(`information_schema.columns`)에서 적재됩니다.
//!
//! # 모듈 구조
//!
//! - `ident`: 식별자 문법 규칙
//! - `registry`: 스키마 레지스트리 (테이블 → 컬럼 집합)

mod ident;
mod registry;

pub use ident::{ensure_identifier, is_valid_identifier, MAX_IDENTIFIER_LEN};
pub use registry::{SchemaRegistry, TableSchema};
