//! # 사용자/스트릭 데이터베이스 쿼리 모듈
//!
//! 트랜잭션 안에서도 쓸 수 있도록 일부 함수는 `SqlitePool` 대신
//! `sqlx::Executor`를 제네릭으로 받습니다.
//! `&SqlitePool`과 `&mut *tx`(트랜잭션) 모두 Executor를 구현합니다.

use crate::error::AppError;
use crate::models::{StreakState, User};
use sqlx::{Executor, Sqlite, SqlitePool};

const USER_COLUMNS: &str = "id, username, is_demo, last_posted_date, last_window_id, \
                            streak_count, life_streak, created_at";

/// 새 사용자를 만듭니다. 스트릭은 비어 있는 상태(0)로 시작합니다.
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    is_demo: bool,
) -> Result<User, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query("INSERT INTO users (id, username, is_demo) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(username)
        .bind(is_demo)
        .execute(pool)
        .await?;

    get_user(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created user".to_string()))
}

pub async fn get_user<'e, E>(executor: E, id: &str) -> Result<Option<User>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(user)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, AppError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// 스트릭이 남아 있는 사용자만 조회합니다 (감쇠 스위퍼용).
pub async fn list_users_with_streak(pool: &SqlitePool) -> Result<Vec<User>, AppError> {
    let sql = format!(
        "SELECT {USER_COLUMNS} FROM users WHERE streak_count > 0 OR life_streak > 0 ORDER BY id"
    );
    let users = sqlx::query_as::<_, User>(&sql).fetch_all(pool).await?;

    Ok(users)
}

/// 스트릭 상태를 저장합니다 (compare-and-swap).
///
/// `expected_window_id`는 읽을 당시의 `last_window_id`입니다.
/// 그 사이 다른 요청이 값을 바꿨다면 아무 행도 갱신되지 않고 `false`를 반환합니다.
/// SQL의 `IS ?`는 NULL끼리도 같다고 비교하므로 첫 포스팅에도 그대로 동작합니다.
pub async fn update_streak<'e, E>(
    executor: E,
    id: &str,
    expected_window_id: Option<&str>,
    next: &StreakState,
) -> Result<bool, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE users
        SET last_posted_date = ?,
            last_window_id = ?,
            streak_count = ?,
            life_streak = ?
        WHERE id = ? AND last_window_id IS ?
        "#,
    )
    .bind(next.last_posted_date)
    .bind(next.last_window_id.as_deref())
    .bind(next.streak_count)
    .bind(next.life_streak)
    .bind(id)
    .bind(expected_window_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() == 1)
}
