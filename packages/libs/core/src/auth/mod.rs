//! 사용자 및 그룹 데이터 모델
//!
//! # 개요
//!
//! 사용자 식별은 외부 인증기가 담당하고, 이 모듈은 그 결과만 표현합니다.
//!
//! - **User**: 인증된 요청 주체
//! - **UserGroupMembership**: 사용자-그룹 연결 (`users_user_groups`). 그룹 자체는 외부에서 관리합니다.

mod user;

pub use user::{User, UserGroupMembership};
