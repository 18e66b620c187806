//! HTTP 핸들러

pub mod entity;
pub mod health;
