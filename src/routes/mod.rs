//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `cycle`: 현재 사이클 윈도우와 카운트다운
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `posts`: 로어 포스팅과 사이클 피드
//! - `quests`: 퀘스트 생성기
//! - `tasks`: 사용자별 할 일 목록
//! - `users`: 사용자 생성/조회 (스트릭 포함)

pub mod cycle;
pub mod health;
pub mod posts;
pub mod quests;
pub mod tasks;
pub mod users;

// routing::{get, patch, post}: HTTP 메서드별 라우팅 함수. `.delete()`처럼 체이닝해 한 경로에 여러 메서드를 붙입니다.
use axum::{
    routing::{get, patch, post},
    Router,
};
// SqlitePool: SQLite 연결 풀 (여러 요청이 연결을 빌려 씀)
use sqlx::SqlitePool;

use crate::services::cycle::CycleClock;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// `SqlitePool`은 내부적으로 Arc, `CycleClock`은 Copy라서 clone 비용이 거의 없습니다.
// #[derive(Clone)]: axum의 State 추출기는 요청마다 상태를 복제하므로 Clone이 필수입니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub clock: CycleClock,
}

/// `/api/v1` 아래에 중첩될 API 라우터를 만듭니다.
///
/// axum 0.8부터 경로 파라미터는 `{id}` 형식입니다.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/cycle", get(cycle::get_cycle))
        // 사용자와 스트릭
        .route("/users", post(users::create_user))
        .route("/users/{id}", get(users::get_user))
        // 로어 포스팅 (스트릭 평가) 과 이번 사이클 피드
        .route("/users/{id}/posts", post(posts::create_post))
        .route("/feed", get(posts::get_feed))
        // 할 일 목록
        .route("/users/{id}/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/users/{id}/tasks/exists", get(tasks::task_exists))
        .route(
            "/users/{id}/tasks/{task_id}",
            patch(tasks::toggle_task).delete(tasks::delete_task),
        )
        // 퀘스트 생성기
        .route("/quests", get(quests::list_quests))
        .with_state(state)
}
