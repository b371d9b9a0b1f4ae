//! # 스트릭 평가기(Streak Evaluator)
//!
//! 포스팅이 성공했을 때 "지금"과 이전 스트릭 상태로부터 다음 스트릭 값을 계산합니다.
//!
//! ## 결정 표 (위에서부터 순서대로 평가)
//! | 조건 | 결과 |
//! |------|------|
//! | `window_id(now) == last_window_id` | 변화 없음 (이번 윈도우에 이미 포스팅함) |
//! | `last_window_id`가 없음, 또는 바로 다음 윈도우 | `streak_count + 1` |
//! | 그 외 (2개 이상 윈도우 공백) | `1`로 리셋 |
//!
//! 리셋은 새 포스팅 순간에 일어나므로 그 포스팅이 새 스트릭의 첫날(1)입니다.
//! 포스팅 없이 윈도우를 놓쳤을 때 0으로 떨어뜨리는 일은 `services::decay` 담당입니다.
//!
//! 이 모듈은 순수 계산만 합니다. 결과를 저장하는 것은 호출자의 몫입니다.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::cycle::{is_immediate_successor, CycleClock, WindowId};
use crate::models::StreakState;

/// 스트릭이 어떻게 바뀌었는지
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakOutcome {
    Unchanged,
    Incremented,
    Reset,
}

/// 평가 결과: `(새 스트릭 값, 새 윈도우 ID)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakUpdate {
    pub streak_count: u32,
    pub window_id: WindowId,
    pub outcome: StreakOutcome,
}

/// 결정 표에 따라 다음 스트릭을 계산합니다.
///
/// `state`는 빌려오기만 하므로 같은 입력으로 몇 번을 호출해도 결과가 같습니다.
pub fn evaluate(clock: &CycleClock, now: DateTime<Utc>, state: &StreakState) -> StreakUpdate {
    let current = clock.window_id(now);
    let last = state.last_window_id.as_deref();

    if last.and_then(|id| id.parse::<WindowId>().ok()) == Some(current) {
        return StreakUpdate {
            streak_count: state.streak_count,
            window_id: current,
            outcome: StreakOutcome::Unchanged,
        };
    }

    if last.is_none() || is_immediate_successor(&current.to_string(), last) {
        StreakUpdate {
            streak_count: state.streak_count.saturating_add(1),
            window_id: current,
            outcome: StreakOutcome::Incremented,
        }
    } else {
        StreakUpdate {
            streak_count: 1,
            window_id: current,
            outcome: StreakOutcome::Reset,
        }
    }
}

impl StreakState {
    /// 평가 결과를 반영한 다음 상태를 만듭니다.
    ///
    /// `Unchanged`면 상태를 그대로 돌려줍니다 (같은 윈도우 재진입은 멱등).
    pub fn apply(&self, update: &StreakUpdate, now: DateTime<Utc>) -> StreakState {
        if update.outcome == StreakOutcome::Unchanged {
            return self.clone();
        }
        StreakState {
            last_posted_date: Some(now),
            last_window_id: Some(update.window_id.to_string()),
            streak_count: update.streak_count,
            life_streak: update.streak_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::cycle::CycleMode;
    use chrono::{Duration, TimeZone};

    fn clock() -> CycleClock {
        CycleClock::new(CycleMode::accelerated(2))
    }

    /// 윈도우 `n`의 한가운데 시각 (2분 윈도우 기준)
    fn in_window(n: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(n * 120_000 + 60_000).unwrap()
    }

    fn post(state: &StreakState, now: DateTime<Utc>) -> (StreakState, StreakOutcome) {
        let update = evaluate(&clock(), now, state);
        (state.apply(&update, now), update.outcome)
    }

    #[test]
    fn first_post_starts_streak_at_one() {
        let (state, outcome) = post(&StreakState::default(), in_window(10));
        assert_eq!(outcome, StreakOutcome::Incremented);
        assert_eq!(state.streak_count, 1);
        assert_eq!(state.life_streak, 1);
        assert_eq!(state.last_window_id.as_deref(), Some("10"));
        assert_eq!(state.last_posted_date, Some(in_window(10)));
    }

    #[test]
    fn consecutive_windows_increment() {
        let (day1, _) = post(&StreakState::default(), in_window(10));
        let (day2, outcome) = post(&day1, in_window(11));
        assert_eq!(outcome, StreakOutcome::Incremented);
        assert_eq!(day2.streak_count, 2);

        let (day3, _) = post(&day2, in_window(12));
        assert_eq!(day3.streak_count, 3);
    }

    #[test]
    fn gap_resets_to_one_not_zero() {
        let (day1, _) = post(&StreakState::default(), in_window(10));
        let (day2, _) = post(&day1, in_window(11));
        let (later, outcome) = post(&day2, in_window(14));
        assert_eq!(outcome, StreakOutcome::Reset);
        assert_eq!(later.streak_count, 1);
        assert_eq!(later.last_window_id.as_deref(), Some("14"));
    }

    #[test]
    fn second_post_in_same_window_is_a_no_op() {
        let (first, _) = post(&StreakState::default(), in_window(10));
        let again = in_window(10) + Duration::seconds(30);
        let (second, outcome) = post(&first, again);
        assert_eq!(outcome, StreakOutcome::Unchanged);
        assert_eq!(second, first);
    }

    #[test]
    fn evaluation_is_idempotent_and_does_not_touch_input() {
        let state = StreakState {
            last_posted_date: Some(in_window(4)),
            last_window_id: Some("4".into()),
            streak_count: 7,
            life_streak: 7,
        };
        let snapshot = state.clone();
        let a = evaluate(&clock(), in_window(5), &state);
        let b = evaluate(&clock(), in_window(5), &state);
        assert_eq!(a, b);
        assert_eq!(a.streak_count, 8);
        assert_eq!(state, snapshot);
    }

    #[test]
    fn same_window_matches_numerically() {
        let state = StreakState {
            last_posted_date: Some(in_window(9)),
            last_window_id: Some("09".into()),
            streak_count: 3,
            life_streak: 3,
        };
        let update = evaluate(&clock(), in_window(9), &state);
        assert_eq!(update.outcome, StreakOutcome::Unchanged);
        assert_eq!(update.streak_count, 3);
    }

    #[test]
    fn unreadable_last_window_counts_as_a_gap() {
        let state = StreakState {
            last_posted_date: Some(in_window(1)),
            last_window_id: Some("garbage".into()),
            streak_count: 5,
            life_streak: 5,
        };
        let update = evaluate(&clock(), in_window(2), &state);
        assert_eq!(update.outcome, StreakOutcome::Reset);
        assert_eq!(update.streak_count, 1);
    }
}
