//! 엔티티 CRUD 핸들러
//!
//! 인증과 권한 해석은 라우트 미들웨어에서 끝난 상태로 들어옵니다.
//! 핸들러는 해석된 권한으로 필드를 걸러낸 뒤 SQL을 만들어 실행합니다.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::Method;
use axum::{Extension, Json};
use serde::Serialize;
use serde_json::{Map, Value};

use tg_core::id::parse_entity_id;
use tg_core::permissions::{AccessEnforcer, ResolvedPermissions};
use tg_sql::{DeleteBuilder, InsertBuilder, SelectBuilder, UpdateBuilder};

use crate::error::{BridgeError, Result};
use crate::state::AppState;

/// 데이터 응답
#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub data: Value,
}

/// 메시지 응답
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl MessageResponse {
    fn new(message: &'static str) -> Self {
        Self {
            message,
            data: None,
        }
    }
}

/// POST /:entity_type
pub async fn create_entity(
    State(state): State<Arc<AppState>>,
    Path(entity_type): Path<String>,
    Extension(permissions): Extension<ResolvedPermissions>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let table = state.schema.resolve_entity(&entity_type)?;
    let body = object_body(body)?;

    let fields = AccessEnforcer::new(&permissions, table).creatable_fields(&body)?;
    let statement = InsertBuilder::new(table).build(&fields)?;
    let outcome = state.entities.execute(&statement).await?;

    if outcome.rows_affected == 0 {
        return Err(BridgeError::NotFound {
            message: "Record not found.".to_string(),
        });
    }

    tracing::info!(
        table = %table.name,
        id = outcome.last_insert_id,
        "record created"
    );

    Ok(Json(MessageResponse {
        message: "Record created successfully.",
        data: Some(Value::from(outcome.last_insert_id)),
    }))
}

/// GET /:entity_type
pub async fn list_entities(
    State(state): State<Arc<AppState>>,
    Path(entity_type): Path<String>,
    Extension(permissions): Extension<ResolvedPermissions>,
) -> Result<Json<DataResponse>> {
    let table = state.schema.resolve_entity(&entity_type)?;

    let columns = AccessEnforcer::new(&permissions, table).readable_columns()?;
    let statement = SelectBuilder::new(table).build(&columns)?;
    let rows = state.entities.fetch_all(&statement).await?;

    Ok(Json(DataResponse {
        data: Value::Array(rows),
    }))
}

/// GET /:entity_type/:entity_id
///
/// 행이 없으면 `data: null`로 200을 돌려줍니다.
pub async fn read_entity(
    State(state): State<Arc<AppState>>,
    Path((entity_type, entity_id)): Path<(String, String)>,
    Extension(permissions): Extension<ResolvedPermissions>,
) -> Result<Json<DataResponse>> {
    let table = state.schema.resolve_entity(&entity_type)?;
    let id = parse_entity_id(&entity_id)?;

    let columns = AccessEnforcer::new(&permissions, table).readable_columns()?;
    let statement = SelectBuilder::new(table).build_by_id(&columns, id)?;
    let row = state
        .entities
        .fetch_all(&statement)
        .await?
        .into_iter()
        .next()
        .unwrap_or(Value::Null);

    Ok(Json(DataResponse { data: row }))
}

/// PUT /:entity_type/:entity_id
pub async fn update_entity(
    State(state): State<Arc<AppState>>,
    Path((entity_type, entity_id)): Path<(String, String)>,
    Extension(permissions): Extension<ResolvedPermissions>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let table = state.schema.resolve_entity(&entity_type)?;
    let id = parse_entity_id(&entity_id)?;
    let body = object_body(body)?;

    let fields = AccessEnforcer::new(&permissions, table).updatable_fields(&body)?;
    let statement = UpdateBuilder::new(table).build(&fields, id)?;
    let outcome = state.entities.execute(&statement).await?;

    if outcome.rows_affected == 0 {
        return Err(BridgeError::BadRequest {
            message: "Nothing to update".to_string(),
        });
    }

    Ok(Json(MessageResponse::new("Record updated successfully.")))
}

/// DELETE /:entity_type/:entity_id
pub async fn delete_entity(
    State(state): State<Arc<AppState>>,
    Path((entity_type, entity_id)): Path<(String, String)>,
    Extension(permissions): Extension<ResolvedPermissions>,
) -> Result<Json<MessageResponse>> {
    let table = state.schema.resolve_entity(&entity_type)?;
    let id = parse_entity_id(&entity_id)?;

    AccessEnforcer::new(&permissions, table).ensure_deletable()?;
    let statement = DeleteBuilder::new(table).build(id)?;
    let outcome = state.entities.execute(&statement).await?;

    tracing::info!(
        table = %table.name,
        id,
        rows = outcome.rows_affected,
        "record deleted"
    );

    Ok(Json(MessageResponse::new("Record deleted successfully.")))
}

/// 매핑되지 않은 메서드
///
/// 권한 미들웨어가 먼저 거부하지 않은 경우에도 같은 500으로 끝냅니다.
pub async fn unsupported_method(method: Method) -> BridgeError {
    tg_core::Error::UnsupportedMethod {
        method: method.to_string(),
    }
    .into()
}

fn object_body(
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Map<String, Value>> {
    let Json(value) = body.map_err(|rejection| BridgeError::BadRequest {
        message: rejection.body_text(),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(tg_core::Error::InvalidBody {
            message: "request body must be a JSON object".to_string(),
        }
        .into()),
    }
}
