//! 컬럼 단위 권한 해석 및 접근 제어
//!
//! # 개요
//!
//! `permissions` 테이블은 (그룹, 테이블, 컬럼)마다 create/read/update/delete 플래그를 가집니다.
//! 사용자의 그룹 소속과 조인한 결과를 컬럼 단위로 병합하고, 작업별 규칙으로 허용 필드를 계산합니다.
//!
//! # 모듈 구조
//!
//! - `policy`: 권한 행과 작업 타입
//! - `context`: 요청 단위로 해석된 권한 집합
//! - `enforcer`: 작업별 허용 필드 계산

mod context;
mod enforcer;
mod policy;

pub use context::{ColumnPermission, ResolvedPermissions};
pub use enforcer::AccessEnforcer;
pub use policy::{ColumnGrant, Operation, Permission};
