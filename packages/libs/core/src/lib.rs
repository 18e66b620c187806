//! tg-core: Tablegate 공통 핵심 라이브러리
//!
//! 이 크레이트는 Bridge와 SQL 빌더가 공유하는 핵심 타입과 로직을 제공합니다.
//!
//! # 모듈 구조
//!
//! - `auth`: 사용자/그룹 데이터 모델
//! - `permissions`: 컬럼 권한 해석 및 접근 제어
//! - `schema`: 테이블/컬럼 허용 목록 (스키마 레지스트리)
//! - `error`: 공통 에러 타입
//! - `id`: 엔티티 ID 파싱

pub mod auth;
pub mod error;
pub mod id;
pub mod permissions;
pub mod schema;

pub use error::{Error, Result};
