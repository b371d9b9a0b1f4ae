//! # 로어(lore) 포스트 모델
//!
//! 포스트는 작성된 윈도우 ID를 함께 기록합니다.
//! 피드는 현재 윈도우의 포스트만 보여주므로, 사이클이 넘어가면 자연스럽게 사라집니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;
use crate::services::streak::StreakOutcome;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LorePost {
    pub id: String,
    pub user_id: String,
    pub caption: Option<String>,
    pub media_url: Option<String>,
    /// 작성 시점의 윈도우 ID
    pub window_id: String,
    pub created_at: DateTime<Utc>,
}

/// `POST /api/v1/users/{id}/posts`의 요청 본문
///
/// 캡처 화면은 이 서비스 범위 밖이므로 미디어는 URL만 받습니다.
#[derive(Debug, Default, Deserialize)]
pub struct CreatePostRequest {
    pub caption: Option<String>,
    pub media_url: Option<String>,
}

/// 포스팅 결과: 새 포스트와 갱신된 사용자, 그리고 스트릭이 어떻게 바뀌었는지
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub post: LorePost,
    pub user: User,
    pub outcome: StreakOutcome,
}
