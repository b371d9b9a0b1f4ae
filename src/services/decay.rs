//! # 스트릭 수동 감쇠(passive decay)
//!
//! 포스팅 없이 윈도우를 하나 통째로 놓친 사용자의 스트릭을 0으로 떨어뜨립니다.
//! 포스팅 순간의 "1로 리셋"(`services::streak`)과는 트리거가 다른 별개의 정책입니다.
//!
//! ## 적용 범위
//! `STREAK_DECAY_SCOPE` 설정으로 고릅니다:
//! - `demo` (기본값): 데모 계정만
//! - `all`: 모든 계정
//! - `none`: 감쇠 없음
//!
//! ## 스위퍼
//! `spawn_sweeper()`는 서버 시작 시 한 번, 그리고 매 사이클 경계(`next_reset_time`)마다
//! 모든 대상 사용자에게 감쇠를 적용하는 백그라운드 태스크입니다.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::str::FromStr;
use tokio::task::JoinHandle;

use super::cycle::{CycleClock, WindowId};
use crate::{db, error::AppError, models::StreakState};

/// 감쇠 정책을 어떤 계정에 적용할지
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecayScope {
    #[default]
    DemoOnly,
    AllAccounts,
    Disabled,
}

impl DecayScope {
    pub fn applies_to(&self, is_demo: bool) -> bool {
        match self {
            DecayScope::DemoOnly => is_demo,
            DecayScope::AllAccounts => true,
            DecayScope::Disabled => false,
        }
    }
}

impl FromStr for DecayScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "demo" => Ok(DecayScope::DemoOnly),
            "all" => Ok(DecayScope::AllAccounts),
            "none" | "off" => Ok(DecayScope::Disabled),
            other => Err(format!("unknown decay scope: {other}")),
        }
    }
}

/// 이전 윈도우를 놓쳤으면 스트릭이 0인 새 상태를, 아니면 `None`을 반환합니다.
///
/// - 마지막 포스팅이 현재 윈도우 또는 바로 이전 윈도우 → 아직 이어갈 수 있음 (`None`)
/// - 스트릭이 이미 0 → 할 일 없음 (`None`)
/// - 윈도우 ID가 없거나 읽을 수 없는데 스트릭이 남아 있음 → 0으로 정리
pub fn decay(clock: &CycleClock, now: DateTime<Utc>, state: &StreakState) -> Option<StreakState> {
    if state.streak_count == 0 && state.life_streak == 0 {
        return None;
    }

    let current = clock.window_id(now);
    let last = state
        .last_window_id
        .as_deref()
        .and_then(|id| id.parse::<WindowId>().ok());

    match last {
        // 저장된 문자열이 i64 끝값이어도 넘치지 않도록 saturating으로 뺍니다
        Some(last) if current.0.saturating_sub(last.0) <= 1 => None,
        _ => Some(StreakState {
            streak_count: 0,
            life_streak: 0,
            ..state.clone()
        }),
    }
}

/// 대상 사용자 전원에게 감쇠를 적용하고, 실제로 0이 된 사용자 수를 반환합니다.
pub async fn sweep(
    pool: &SqlitePool,
    clock: &CycleClock,
    scope: DecayScope,
    now: DateTime<Utc>,
) -> Result<usize, AppError> {
    if scope == DecayScope::Disabled {
        return Ok(0);
    }

    let users = db::list_users_with_streak(pool).await?;
    let mut decayed = 0;
    for user in users.iter().filter(|u| scope.applies_to(u.is_demo)) {
        let Some(next) = decay(clock, now, &user.streak) else {
            continue;
        };
        // 그 사이 새 포스팅이 들어왔다면 CAS가 실패하고 감쇠를 건너뜁니다
        if db::update_streak(pool, &user.id, user.streak.last_window_id.as_deref(), &next).await? {
            tracing::debug!("Streak decayed to 0 for user {}", user.id);
            decayed += 1;
        }
    }
    Ok(decayed)
}

/// 사이클 경계마다 `sweep()`을 실행하는 백그라운드 태스크를 시작합니다.
///
/// 스윕이 실패해도 태스크는 죽지 않고 다음 경계에서 다시 시도합니다.
pub fn spawn_sweeper(pool: SqlitePool, clock: CycleClock, scope: DecayScope) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let now = Utc::now();
            match sweep(&pool, &clock, scope, now).await {
                Ok(0) => {}
                Ok(n) => tracing::info!("Decayed {} streak(s) at window {}", n, clock.window_id(now)),
                Err(e) => tracing::warn!("Streak decay sweep failed: {}", e),
            }

            let wait = clock
                .time_until_reset(Utc::now())
                .to_std()
                .unwrap_or_default();
            tracing::debug!("Next decay sweep in {:?}", wait);
            tokio::time::sleep(wait).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::cycle::CycleMode;
    use chrono::TimeZone;

    fn clock() -> CycleClock {
        CycleClock::new(CycleMode::accelerated(2))
    }

    fn in_window(n: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(n * 120_000 + 1_000).unwrap()
    }

    fn streak_of(count: u32, window: i64) -> StreakState {
        StreakState {
            last_posted_date: Some(in_window(window)),
            last_window_id: Some(window.to_string()),
            streak_count: count,
            life_streak: count,
        }
    }

    #[test]
    fn keeps_streak_while_previous_window_was_posted() {
        assert_eq!(decay(&clock(), in_window(5), &streak_of(3, 5)), None);
        assert_eq!(decay(&clock(), in_window(6), &streak_of(3, 5)), None);
    }

    #[test]
    fn missed_window_decays_to_zero() {
        let decayed = decay(&clock(), in_window(7), &streak_of(3, 5)).unwrap();
        assert_eq!(decayed.streak_count, 0);
        assert_eq!(decayed.life_streak, 0);
        // 마지막 포스팅 기록은 남깁니다
        assert_eq!(decayed.last_window_id.as_deref(), Some("5"));
    }

    #[test]
    fn zero_streak_needs_nothing() {
        assert_eq!(decay(&clock(), in_window(50), &streak_of(0, 5)), None);
        assert_eq!(decay(&clock(), in_window(50), &StreakState::default()), None);
    }

    #[test]
    fn extreme_stored_window_ids_do_not_overflow() {
        let mut ancient = streak_of(4, 0);
        ancient.last_window_id = Some(i64::MIN.to_string());
        let decayed = decay(&clock(), in_window(5), &ancient).unwrap();
        assert_eq!(decayed.streak_count, 0);

        // 미래의 윈도우 ID는 놓친 것으로 보지 않습니다
        let mut future = streak_of(4, 0);
        future.last_window_id = Some(i64::MAX.to_string());
        assert_eq!(decay(&clock(), in_window(5), &future), None);
    }

    #[test]
    fn scope_selects_accounts() {
        assert!(DecayScope::DemoOnly.applies_to(true));
        assert!(!DecayScope::DemoOnly.applies_to(false));
        assert!(DecayScope::AllAccounts.applies_to(false));
        assert!(!DecayScope::Disabled.applies_to(true));

        assert_eq!("ALL".parse::<DecayScope>(), Ok(DecayScope::AllAccounts));
        assert_eq!("none".parse::<DecayScope>(), Ok(DecayScope::Disabled));
        assert!("weekly".parse::<DecayScope>().is_err());
    }

    #[tokio::test]
    async fn sweep_respects_scope() {
        use crate::db::test_pool;
        use crate::models::CreatePostRequest;
        use crate::services::posts::publish_lore;

        let pool = test_pool().await;
        let demo = db::create_user(&pool, "demo", true).await.unwrap();
        let member = db::create_user(&pool, "member", false).await.unwrap();
        for user in [&demo, &member] {
            publish_lore(&pool, &clock(), &user.id, CreatePostRequest::default(), in_window(5))
                .await
                .unwrap();
        }

        // 바로 다음 윈도우에서는 아무도 감쇠되지 않습니다
        assert_eq!(sweep(&pool, &clock(), DecayScope::AllAccounts, in_window(6)).await.unwrap(), 0);

        assert_eq!(sweep(&pool, &clock(), DecayScope::DemoOnly, in_window(7)).await.unwrap(), 1);
        let demo_after = db::get_user(&pool, &demo.id).await.unwrap().unwrap();
        let member_after = db::get_user(&pool, &member.id).await.unwrap().unwrap();
        assert_eq!(demo_after.streak.streak_count, 0);
        assert_eq!(member_after.streak.streak_count, 1);

        assert_eq!(sweep(&pool, &clock(), DecayScope::Disabled, in_window(7)).await.unwrap(), 0);
        assert_eq!(sweep(&pool, &clock(), DecayScope::AllAccounts, in_window(7)).await.unwrap(), 1);
        let member_after = db::get_user(&pool, &member.id).await.unwrap().unwrap();
        assert_eq!(member_after.streak.streak_count, 0);
        assert_eq!(member_after.streak.last_window_id.as_deref(), Some("5"));
    }
}
