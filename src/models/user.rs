//! # 사용자와 스트릭 상태 모델
//!
//! 스트릭 상태는 포스팅이 성공할 때마다 정확히 한 번 갱신되고,
//! 화면은 매 렌더링마다 이 값을 읽습니다.

// DateTime<Utc>: 시간대 정보(UTC)가 붙은 시각. SQLite에는 RFC 3339 문자열로 저장됩니다.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 사용자의 스트릭 상태: `users` 테이블의 스트릭 컬럼 묶음
///
/// 불변식: `last_posted_date`가 `None`이면 `streak_count == 0`
///
/// `life_streak`는 이 구현에서 `streak_count`의 미러입니다.
// - Default: 모든 필드가 None/0인 "한 번도 포스팅하지 않은" 상태를 만듭니다
// - sqlx::FromRow: SELECT 결과 행을 이 구조체로 자동 매핑 (컬럼 이름 = 필드 이름)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StreakState {
    /// 마지막으로 포스팅한 시각 (한 번도 안 했으면 None)
    pub last_posted_date: Option<DateTime<Utc>>,
    /// 마지막 포스팅의 윈도우 ID: 문자열로 저장하고 숫자로 비교합니다
    pub last_window_id: Option<String>,
    pub streak_count: u32,
    pub life_streak: u32,
}

/// 사용자 엔티티: DB의 `users` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    /// 데모(비로그인) 계정 여부: 수동 감쇠 정책의 적용 범위를 가릅니다
    pub is_demo: bool,
    /// #[sqlx(flatten)] / #[serde(flatten)]: 스트릭 컬럼을 중첩 구조체로 읽고,
    /// JSON에서는 다시 평평하게 펼칩니다.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub streak: StreakState,
    pub created_at: String,
}

/// `POST /api/v1/users`의 요청 본문
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    /// 없으면 false (일반 계정)
    #[serde(default)]
    pub is_demo: bool,
}
