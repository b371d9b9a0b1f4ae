//! # 사이클 시계(Cycle Clock)와 윈도우 ID
//!
//! 하루 한 번 포스팅하는 "일일 사이클"의 시간 경계를 계산합니다.
//! 타임라인은 길이 `D`짜리 반열린 구간 `[start, start + D)`로 빈틈 없이 나뉩니다.
//!
//! ## 두 가지 모드
//! | 모드 | 윈도우 길이 | 정렬 기준 |
//! |------|-------------|-----------|
//! | `Calendar` (프로덕션) | 24시간 | 설정된 UTC 오프셋의 자정 |
//! | `Accelerated` (테스트) | 고정 N분 (기본 2분) | Unix epoch |
//!
//! 모든 함수는 `now`를 인자로 받는 순수 함수입니다.
//! 1초마다 폴링하거나 카운트다운이 0이 될 때 콜백을 부르는 일은 호출자의 몫입니다.
//!
//! ## 윈도우 ID
//! `window_id(t) = floor((t_ms + offset_ms) / D_ms)`
//! - 가속 모드는 offset이 0이므로 `floor(t_ms / D_ms)`와 같습니다.
//! - 캘린더 모드는 로컬 자정 기준 "몇 번째 날"이므로 윈도우 시작 시각과 항상 일치합니다.
//!
//! ID는 문자열로 저장/전송되지만 비교는 항상 숫자로 합니다.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::models::CycleSnapshot;

/// 사이클 모드: 생성 시점에 명시적으로 주입되는 설정값입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleMode {
    /// 로컬 자정에 맞춘 24시간 윈도우
    Calendar { offset: FixedOffset },
    /// epoch에 맞춘 고정 길이 윈도우
    Accelerated { duration: Duration },
}

impl CycleMode {
    /// `minutes`분짜리 가속 모드. 0분은 1분으로 올립니다.
    pub fn accelerated(minutes: u32) -> Self {
        CycleMode::Accelerated {
            duration: Duration::minutes(i64::from(minutes.max(1))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CycleMode::Calendar { .. } => "production",
            CycleMode::Accelerated { .. } => "accelerated",
        }
    }
}

/// 윈도우의 정수 인덱스. 전체 순서가 있고, `id + 1`이 바로 다음 윈도우입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub i64);

impl WindowId {
    /// 바로 다음 윈도우. 저장된 값이 `i64::MAX`라면 다음이 없으므로 `None`입니다.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(WindowId)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WindowId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(WindowId)
    }
}

/// `current`가 `last`의 바로 다음 윈도우인지 판단합니다.
///
/// 두 값 모두 숫자로 파싱한 뒤 `current == last + 1`인지 비교합니다.
/// `last`가 없거나(첫 포스팅) 파싱할 수 없으면 항상 `false`입니다.
/// "이전 기록 없음"은 호출자가 별도 분기로 처리해야 합니다.
pub fn is_immediate_successor(current: &str, last: Option<&str>) -> bool {
    let Some(last) = last else {
        return false;
    };
    match (current.parse::<WindowId>(), last.parse::<WindowId>()) {
        (Ok(current), Ok(last)) => last.next() == Some(current),
        _ => false,
    }
}

/// 사이클 경계 계산기
///
/// `Copy` 타입이라 AppState에 그대로 넣고 핸들러마다 복사해 써도 됩니다.
#[derive(Debug, Clone, Copy)]
pub struct CycleClock {
    mode: CycleMode,
}

impl CycleClock {
    pub fn new(mode: CycleMode) -> Self {
        Self { mode }
    }

    /// 윈도우 길이 `D`: 캘린더 모드는 24시간, 가속 모드는 설정값
    pub fn cycle_duration(&self) -> Duration {
        match self.mode {
            CycleMode::Calendar { .. } => Duration::days(1),
            CycleMode::Accelerated { duration } => duration,
        }
    }

    /// 0 이하의 길이로 나누지 않도록 최소 1ms를 보장합니다.
    fn duration_ms(&self) -> i64 {
        self.cycle_duration().num_milliseconds().max(1)
    }

    fn offset_ms(&self) -> i64 {
        match self.mode {
            CycleMode::Calendar { offset } => i64::from(offset.local_minus_utc()) * 1000,
            CycleMode::Accelerated { .. } => 0,
        }
    }

    /// 시각 → 윈도우 ID
    ///
    /// `div_euclid`를 쓰므로 epoch 이전 시각도 올바르게 내림(floor)됩니다.
    pub fn window_id(&self, timestamp: DateTime<Utc>) -> WindowId {
        WindowId((timestamp.timestamp_millis() + self.offset_ms()).div_euclid(self.duration_ms()))
    }

    /// `now`가 속한 윈도우의 시작 시각
    ///
    /// 캘린더 모드: 로컬 자정으로 내림 (시/분/초/밀리초 = 0)
    /// 가속 모드: `floor(now / D) * D`
    pub fn current_window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let into_window = (now.timestamp_millis() + self.offset_ms()).rem_euclid(self.duration_ms());
        // 밀리초 아래 나노초도 버려야 경계가 정확히 맞습니다
        let sub_ms = i64::from(now.timestamp_subsec_nanos() % 1_000_000);
        now - Duration::milliseconds(into_window) - Duration::nanoseconds(sub_ms)
    }

    /// 다음 리셋 시각 (현재 윈도우의 끝)
    ///
    /// 경계 위의 시각이라도 항상 `now < next_reset_time(now)`가 성립하도록
    /// `current_window_start(now) + D`로 계산합니다.
    pub fn next_reset_time(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.current_window_start(now) + self.cycle_duration()
    }

    /// 바로 이전 윈도우의 시작 시각
    pub fn previous_window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.current_window_start(now) - self.cycle_duration()
    }

    /// 다음 리셋까지 남은 시간 (카운트다운 표시용)
    pub fn time_until_reset(&self, now: DateTime<Utc>) -> Duration {
        self.next_reset_time(now) - now
    }

    /// 사이클 기준 시간대의 오늘 날짜 (가속 모드는 UTC)
    pub fn local_date(&self, now: DateTime<Utc>) -> NaiveDate {
        match self.mode {
            CycleMode::Calendar { offset } => now.with_timezone(&offset).date_naive(),
            CycleMode::Accelerated { .. } => now.date_naive(),
        }
    }

    /// `/cycle` 응답용 스냅샷
    pub fn snapshot(&self, now: DateTime<Utc>) -> CycleSnapshot {
        CycleSnapshot {
            mode: self.mode.name().to_string(),
            window_id: self.window_id(now).to_string(),
            window_start: self.current_window_start(now),
            previous_window_start: self.previous_window_start(now),
            next_reset: self.next_reset_time(now),
            remaining_ms: self.time_until_reset(now).num_milliseconds(),
            cycle_duration_ms: self.duration_ms(),
        }
    }
}
