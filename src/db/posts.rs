//! # 로어 포스트 데이터베이스 쿼리 모듈

use crate::error::AppError;
use crate::models::LorePost;
use sqlx::{Executor, Sqlite, SqlitePool};

pub async fn insert_post<'e, E>(executor: E, post: &LorePost) -> Result<(), AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO lore_posts (id, user_id, caption, media_url, window_id, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&post.id)
    .bind(&post.user_id)
    .bind(post.caption.as_deref())
    .bind(post.media_url.as_deref())
    .bind(&post.window_id)
    .bind(post.created_at)
    .execute(executor)
    .await?;

    Ok(())
}

/// 한 윈도우에 올라온 포스트를 최신순으로 조회합니다 (피드).
pub async fn list_posts_in_window(
    pool: &SqlitePool,
    window_id: &str,
) -> Result<Vec<LorePost>, AppError> {
    let posts = sqlx::query_as::<_, LorePost>(
        r#"
        SELECT id, user_id, caption, media_url, window_id, created_at
        FROM lore_posts
        WHERE window_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(window_id)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}
