//! Tablegate Bridge
//!
//! MySQL 테이블을 `/:entityType[/:entityId]` REST 엔드포인트로 노출합니다.
//! 모든 요청은 그룹 소속 기반의 컬럼 단위 권한으로 걸러집니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod auth;
mod config;
mod error;
mod handlers;
mod middleware;
mod resolver;
mod state;
mod store;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 환경변수 로드
    dotenvy::dotenv().ok();

    // 로깅 초기화
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "tg_bridge=debug,tower_http=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 설정 로드
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {:#}", e);
            return Err(e);
        }
    };
    tracing::info!("Starting Bridge with config: {:?}", config);

    // 앱 상태 초기화
    let state = match AppState::new(&config).await {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("failed to initialize database state: {:#}", e);
            return Err(e);
        }
    };

    // 라우터 구성
    let app = create_router(state, config.request_timeout());

    // 서버 시작
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Bridge listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// 라우터 생성
///
/// 엔티티 라우트에만 인증과 권한 해석이 걸립니다. `/health`는 예외입니다.
fn create_router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    use handlers::entity;

    let entities = Router::new()
        .route(
            "/:entity_type",
            get(entity::list_entities)
                .post(entity::create_entity)
                .fallback(entity::unsupported_method),
        )
        .route(
            "/:entity_type/:entity_id",
            get(entity::read_entity)
                .put(entity::update_entity)
                .delete(entity::delete_entity)
                .fallback(entity::unsupported_method),
        )
        // 나중에 추가한 레이어가 먼저 실행됩니다 (인증 → 권한)
        .route_layer(from_fn_with_state(state.clone(), middleware::check_permission))
        .route_layer(from_fn_with_state(state.clone(), middleware::authenticate));

    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        .merge(entities)
        // Middleware
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(from_fn(middleware::request_id))
        // State
        .with_state(state)
}
