use chrono::{DateTime, Utc};
use serde::Serialize;

/// `GET /api/v1/cycle` 응답: 클라이언트는 이 값으로 카운트다운을 그리고,
/// `next_reset`을 지나면 스스로 새로고침합니다.
#[derive(Debug, Clone, Serialize)]
pub struct CycleSnapshot {
    /// "production" 또는 "accelerated"
    pub mode: String,
    pub window_id: String,
    pub window_start: DateTime<Utc>,
    /// 직전 윈도우의 시작: 이 시각 이후 포스팅이 있어야 스트릭이 이어집니다
    pub previous_window_start: DateTime<Utc>,
    pub next_reset: DateTime<Utc>,
    pub remaining_ms: i64,
    pub cycle_duration_ms: i64,
}
