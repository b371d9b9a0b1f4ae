//! # 로어 포스팅
//!
//! 포스트 저장과 스트릭 갱신을 하나의 트랜잭션으로 묶습니다.
//!
//! ## 처리 흐름
//! ```text
//! BEGIN
//!   사용자 조회 → 스트릭 평가(services::streak) → 스트릭 저장(CAS) → 포스트 저장
//! COMMIT
//! ```
//! 같은 사용자의 포스팅 두 개가 동시에 들어와도 스트릭 저장이 compare-and-swap이라
//! 둘 다 증가시키는 일은 없습니다. 늦은 쪽은 409 Conflict를 받고 다시 시도하면 됩니다.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::cycle::CycleClock;
use super::streak::{self, StreakOutcome};
use crate::{
    db,
    error::AppError,
    models::{CreatePostRequest, LorePost, PostResponse},
};

pub async fn publish_lore(
    pool: &SqlitePool,
    clock: &CycleClock,
    user_id: &str,
    req: CreatePostRequest,
    now: DateTime<Utc>,
) -> Result<PostResponse, AppError> {
    let mut tx = pool.begin().await?;

    let mut user = db::get_user(&mut *tx, user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let update = streak::evaluate(clock, now, &user.streak);
    if update.outcome != StreakOutcome::Unchanged {
        let next = user.streak.apply(&update, now);
        let swapped = db::update_streak(
            &mut *tx,
            user_id,
            user.streak.last_window_id.as_deref(),
            &next,
        )
        .await?;
        if !swapped {
            return Err(AppError::Conflict(
                "Streak was updated concurrently, retry the post".to_string(),
            ));
        }
        user.streak = next;
    }

    let post = LorePost {
        id: uuid::Uuid::now_v7().to_string(),
        user_id: user_id.to_string(),
        caption: req.caption,
        media_url: req.media_url,
        window_id: update.window_id.to_string(),
        created_at: now,
    };
    db::insert_post(&mut *tx, &post).await?;

    tx.commit().await?;

    tracing::debug!(
        "User {} posted in window {} ({:?}, streak {})",
        user_id,
        post.window_id,
        update.outcome,
        user.streak.streak_count
    );

    Ok(PostResponse {
        post,
        user,
        outcome: update.outcome,
    })
}
