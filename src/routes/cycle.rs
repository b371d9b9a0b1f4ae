//! # 사이클 핸들러
//!
//! - `GET /api/v1/cycle` → 현재 윈도우 ID, 시작 시각, 다음 리셋 시각, 남은 밀리초
//!
//! 클라이언트는 1초마다 `remaining_ms`를 줄여가며 카운트다운을 그리고,
//! 0이 되면 다시 호출해서 새 윈도우를 받아갑니다.

use axum::{extract::State, Json};
use chrono::Utc;

use super::AppState;
use crate::models::CycleSnapshot;

pub async fn get_cycle(State(state): State<AppState>) -> Json<CycleSnapshot> {
    Json(state.clock.snapshot(Utc::now()))
}
