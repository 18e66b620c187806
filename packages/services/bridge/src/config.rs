//! Bridge 설정

use std::env;
use std::fmt;
use std::time::Duration;

use anyhow::{anyhow, Context};
use sqlx::mysql::MySqlConnectOptions;

/// 인증 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// 고정 사용자 (개발용 스텁)
    Static,

    /// 상위 게이트웨이가 넣어준 `x-user-id` / `x-user-email` 헤더 신뢰
    Header,
}

impl AuthMode {
    fn parse(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "static" => Ok(AuthMode::Static),
            "header" => Ok(AuthMode::Header),
            other => Err(anyhow!("unknown TG_AUTH_MODE: {}", other)),
        }
    }
}

/// DB 접속 정보
#[derive(Clone)]
pub struct DatabaseConfig {
    pub name: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

impl DatabaseConfig {
    /// sqlx 접속 옵션
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

/// Bridge 설정
#[derive(Debug, Clone)]
pub struct Config {
    /// 서버 포트
    pub port: u16,

    /// DB 접속 정보
    pub database: DatabaseConfig,

    /// 커넥션 풀 크기
    pub db_max_connections: u32,

    /// 커넥션 획득 타임아웃 (초)
    pub db_acquire_timeout_secs: u64,

    /// 요청 처리 타임아웃 (초)
    pub request_timeout_secs: u64,

    /// 인증 모드
    pub auth_mode: AuthMode,

    /// Static 모드 사용자 ID
    pub static_user_id: i64,

    /// Static 모드 사용자 이메일
    pub static_user_email: String,
}

impl Config {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 조회 함수에서 설정 로드
    ///
    /// DB 접속 정보 4종(`MYSQL_DB`, `MYSQL_USER`, `MYSQL_PASS`, `MYSQL_HOST`)은 필수입니다.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| anyhow!("{} not set", key))
        };
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database = DatabaseConfig {
            name: required("MYSQL_DB")?,
            user: required("MYSQL_USER")?,
            password: required("MYSQL_PASS")?,
            host: required("MYSQL_HOST")?,
            port: or_default("MYSQL_PORT", "3306")
                .parse()
                .context("MYSQL_PORT must be a port number")?,
        };

        Ok(Self {
            port: or_default("TG_BRIDGE_PORT", "3000")
                .parse()
                .context("TG_BRIDGE_PORT must be a port number")?,

            database,

            db_max_connections: or_default("TG_DB_MAX_CONNECTIONS", "10")
                .parse()
                .unwrap_or(10),

            db_acquire_timeout_secs: or_default("TG_DB_ACQUIRE_TIMEOUT_SECS", "5")
                .parse()
                .unwrap_or(5),

            request_timeout_secs: or_default("TG_REQUEST_TIMEOUT_SECS", "30")
                .parse()
                .unwrap_or(30),

            auth_mode: AuthMode::parse(&or_default("TG_AUTH_MODE", "static"))?,

            static_user_id: or_default("TG_STATIC_USER_ID", "1")
                .parse()
                .context("TG_STATIC_USER_ID must be an integer")?,

            static_user_email: or_default("TG_STATIC_USER_EMAIL", "user@example.com"),
        })
    }

    pub fn db_acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.db_acquire_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
