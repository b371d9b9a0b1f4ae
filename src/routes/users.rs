//! # 사용자 API 라우트 핸들러
//!
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | /api/v1/users | `create_user` | 사용자 생성 (스트릭 0) |
//! | GET | /api/v1/users/{id} | `get_user` | 사용자와 스트릭 상태 조회 |

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::AppState;
use crate::{db, error::AppError, models::*};

/// `POST /users` + `{ "username": "mina", "is_demo": true }`
///
/// 이름이 비어 있으면 400, 이미 있으면 409를 반환합니다.
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let username = req.username.trim();
    if username.is_empty() {
        return Err(AppError::BadRequest("username must not be empty".to_string()));
    }
    if db::find_by_username(&state.pool, username).await?.is_some() {
        return Err(AppError::Conflict(format!("username '{username}' is taken")));
    }

    let user = db::create_user(&state.pool, username, req.is_demo).await?;
    tracing::info!("Created user {} ({})", user.username, user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users/{id}`: 화면이 매 렌더링마다 읽는 스트릭 상태를 포함합니다.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    let user = db::get_user(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::services::cycle::{CycleClock, CycleMode};

    async fn state() -> AppState {
        AppState {
            pool: test_pool().await,
            clock: CycleClock::new(CycleMode::accelerated(2)),
        }
    }

    fn request(username: &str) -> Json<CreateUserRequest> {
        Json(CreateUserRequest {
            username: username.to_string(),
            is_demo: false,
        })
    }

    #[tokio::test]
    async fn create_then_fetch() {
        let state = state().await;
        let (status, Json(user)) = create_user(State(state.clone()), request(" mina "))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(user.username, "mina");

        let Json(found) = get_user(State(state), Path(user.id.clone())).await.unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.streak.streak_count, 0);
    }

    #[tokio::test]
    async fn rejects_blank_and_duplicate_names() {
        let state = state().await;
        assert!(matches!(
            create_user(State(state.clone()), request("  ")).await,
            Err(AppError::BadRequest(_))
        ));

        create_user(State(state.clone()), request("joon")).await.unwrap();
        assert!(matches!(
            create_user(State(state.clone()), request("joon")).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn missing_user_is_404() {
        let state = state().await;
        assert!(matches!(
            get_user(State(state), Path("nope".to_string())).await,
            Err(AppError::NotFound)
        ));
    }
}
