//! # 할 일 목록 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/users/{id}/tasks | `list_tasks` | 목록 (첫 사용 시 기본 2개) |
//! | POST | /api/v1/users/{id}/tasks | `create_task` | 맨 앞에 추가 |
//! | GET | /api/v1/users/{id}/tasks/exists?text= | `task_exists` | 중복 확인 |
//! | PATCH | /api/v1/users/{id}/tasks/{task_id} | `toggle_task` | 완료 여부 뒤집기 |
//! | DELETE | /api/v1/users/{id}/tasks/{task_id} | `delete_task` | 삭제 |
//!
//! 매 요청마다 스냅샷을 읽고 → 변경하고 → 통째로 다시 씁니다.
//! 공백 텍스트 추가나 없는 ID의 토글/삭제는 에러가 아니라 "변경 없음"으로 응답합니다.
//!
//! 쓰기는 스냅샷 버전에 대한 비교-교체(CAS)입니다. 같은 사용자의 요청 두 개가 같은
//! 버전을 읽고 동시에 쓰면 늦은 쪽은 409 Conflict를 받고, 먼저 쓴 변경은 보존됩니다.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use super::AppState;
use crate::{
    db::{self, SqliteSnapshotStore},
    error::AppError,
    models::*,
    services::tasks::TaskList,
};

/// 사용자가 존재하는지 확인한 뒤 그 사용자의 목록을 읽어옵니다.
async fn load_list(
    state: &AppState,
    user_id: &str,
) -> Result<TaskList<SqliteSnapshotStore>, AppError> {
    db::get_user(&state.pool, user_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let store = SqliteSnapshotStore::daily_tasks(state.pool.clone(), user_id);
    Ok(TaskList::load(store).await)
}

/// `GET /users/{id}/tasks` → `{ "tasks": [...] }`
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let list = load_list(&state, &id).await?;
    Ok(Json(json!({ "tasks": list.list() })))
}

/// `POST /users/{id}/tasks` + `{ "text": "Drink Water", "unique": true }`
///
/// → `{ "task": {...} | null, "tasks": [...] }`
///
/// `unique`가 true이고 같은 텍스트가 이미 있으면 409 Conflict.
pub async fn create_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<Json<Value>, AppError> {
    let mut list = load_list(&state, &id).await?;
    if req.unique && list.exists(&req.text) {
        return Err(AppError::Conflict(format!(
            "task '{}' already exists",
            req.text.trim()
        )));
    }

    let task = list.add(&req.text).await?;
    Ok(Json(json!({ "task": task, "tasks": list.list() })))
}

/// `GET /users/{id}/tasks/exists?text=...` → `{ "exists": true }`
pub async fn task_exists(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<TaskExistsQuery>,
) -> Result<Json<Value>, AppError> {
    let list = load_list(&state, &id).await?;
    Ok(Json(json!({ "exists": list.exists(&query.text) })))
}

/// `PATCH /users/{id}/tasks/{task_id}` → `{ "changed": bool, "tasks": [...] }`
pub async fn toggle_task(
    State(state): State<AppState>,
    Path((id, task_id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let mut list = load_list(&state, &id).await?;
    let changed = list.toggle(&task_id).await?;
    Ok(Json(json!({ "changed": changed, "tasks": list.list() })))
}

/// `DELETE /users/{id}/tasks/{task_id}` → `{ "changed": bool, "tasks": [...] }`
pub async fn delete_task(
    State(state): State<AppState>,
    Path((id, task_id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let mut list = load_list(&state, &id).await?;
    let changed = list.delete(&task_id).await?;
    Ok(Json(json!({ "changed": changed, "tasks": list.list() })))
}
