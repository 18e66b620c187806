//! tg-sql: 동적 SQL 생성 라이브러리
//!
//! 스키마 레지스트리의 테이블 정의를 기반으로 런타임에 CRUD SQL을 생성합니다.
//! SeaQuery로 식별자를 인용하고, 모든 값은 바인딩 파라미터(`?`)로 전달합니다.
//!
//! # 모듈 구조
//!
//! - `builder`: CRUD SQL 빌더
//! - `statement`: 생성된 SQL + 바인딩 값
//! - `error`: 빌더 에러

pub mod builder;
pub mod error;
pub mod statement;

pub use builder::{DeleteBuilder, InsertBuilder, SelectBuilder, UpdateBuilder};
pub use error::{Error, Result};
pub use statement::Statement;
