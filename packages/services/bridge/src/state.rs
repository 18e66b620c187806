//! Bridge 앱 상태

use std::sync::Arc;

use tg_core::schema::SchemaRegistry;

use crate::auth::{self, Authenticator};
use crate::config::Config;
use crate::resolver::PermissionResolver;
use crate::store::{EntityStore, MySqlStore, PermissionStore};

/// 앱 상태
///
/// 모든 핸들러에서 공유하는 상태입니다. 프로세스 수명 동안 변하지 않습니다.
pub struct AppState {
    /// 요청 주체 확정
    pub authenticator: Box<dyn Authenticator>,

    /// 요청 단위 권한 해석
    pub resolver: PermissionResolver,

    /// 엔티티 CRUD 실행
    pub entities: Arc<dyn EntityStore>,

    /// 시작 시 읽은 테이블/컬럼 카탈로그
    pub schema: SchemaRegistry,
}

impl AppState {
    /// 새 상태 생성
    ///
    /// 커넥션 풀을 만들고 스키마 카탈로그를 한 번 읽습니다.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let store = Arc::new(MySqlStore::connect(config).await?);
        let schema = store.load_schema().await?;
        tracing::info!(tables = schema.len(), "schema registry loaded");

        Ok(Self::with_stores(
            auth::from_config(config),
            store.clone(),
            store,
            schema,
        ))
    }

    /// 저장소 주입
    pub fn with_stores(
        authenticator: Box<dyn Authenticator>,
        permissions: Arc<dyn PermissionStore>,
        entities: Arc<dyn EntityStore>,
        schema: SchemaRegistry,
    ) -> Self {
        Self {
            authenticator,
            resolver: PermissionResolver::new(permissions),
            entities,
            schema,
        }
    }
}
