//! # 로어 포스트 API 라우트 핸들러
//!
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | /api/v1/users/{id}/posts | `create_post` | 포스팅 + 스트릭 평가 |
//! | GET | /api/v1/feed | `get_feed` | 이번 사이클의 포스트 |
//!
//! 피드는 현재 윈도우 ID의 포스트만 보여줍니다.
//! 사이클이 넘어가면 이전 포스트는 피드에서 사라집니다 (데이터는 남음).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use super::AppState;
use crate::{db, error::AppError, models::*, services::posts::publish_lore};

/// `POST /users/{id}/posts` + `{ "caption": "...", "media_url": "..." }`
///
/// 응답의 `outcome`은 `incremented` / `unchanged` / `reset` 중 하나입니다.
pub async fn create_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    let response = publish_lore(&state.pool, &state.clock, &id, req, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /feed` → `{ "window_id": "...", "next_reset": "...", "posts": [...] }`
pub async fn get_feed(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    get_feed_at(&state, Utc::now()).await
}

/// `now` 시점의 피드. 핸들러는 현재 시각을, 테스트는 고정된 시각을 넘깁니다.
async fn get_feed_at(state: &AppState, now: DateTime<Utc>) -> Result<Json<Value>, AppError> {
    let window_id = state.clock.window_id(now).to_string();
    let posts = db::list_posts_in_window(&state.pool, &window_id).await?;

    Ok(Json(json!({
        "window_id": window_id,
        "next_reset": state.clock.next_reset_time(now),
        "posts": posts
    })))
}
