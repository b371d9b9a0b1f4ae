//! # 퀘스트 생성기 라우트 핸들러
//!
//! - `GET /api/v1/quests?category=Sports&date=2026-10-19&count=10&type=CANON`
//!
//! 모든 파라미터는 선택입니다:
//! - `category`: 기본값 "All"
//! - `date`: 기본값은 사이클 기준 시간대의 오늘
//! - `count`: 기본값 10, 최대 100
//! - `type`: CANON / SPONTY / RANDOM (없으면 레코드마다 무작위)
//!
//! 같은 요청이라도 매번 다른 퀘스트가 나옵니다 (시드 없는 난수).

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use super::AppState;
use crate::{error::AppError, models::*, services::quest_generator};

const DEFAULT_COUNT: usize = 10;
const MAX_COUNT: usize = 100;

pub async fn list_quests(
    State(state): State<AppState>,
    Query(query): Query<QuestQuery>,
) -> Result<Json<Value>, AppError> {
    let count = query.count.unwrap_or(DEFAULT_COUNT);
    if count > MAX_COUNT {
        return Err(AppError::BadRequest(format!(
            "count must be at most {MAX_COUNT}"
        )));
    }

    let request = QuestRequest {
        category: query.category.unwrap_or_else(|| "All".to_string()),
        date: query
            .date
            .unwrap_or_else(|| state.clock.local_date(Utc::now())),
        count,
        mode: query.mode,
    };
    let quests = quest_generator::generate(&mut rand::thread_rng(), &request);

    Ok(Json(json!({ "quests": quests })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::services::cycle::{CycleClock, CycleMode};

    async fn state() -> AppState {
        AppState {
            pool: test_pool().await,
            clock: CycleClock::new(CycleMode::accelerated(2)),
        }
    }

    #[tokio::test]
    async fn defaults_to_ten_quests_across_all_categories() {
        let Json(body) = list_quests(State(state().await), Query(QuestQuery::default()))
            .await
            .unwrap();
        let quests = body["quests"].as_array().unwrap();
        assert_eq!(quests.len(), 10);
        assert_eq!(quests[0]["activity"], "Basketball");
    }

    #[tokio::test]
    async fn unknown_category_is_empty_and_count_is_capped() {
        let query = QuestQuery {
            category: Some("Knitting".to_string()),
            ..QuestQuery::default()
        };
        let Json(body) = list_quests(State(state().await), Query(query)).await.unwrap();
        assert!(body["quests"].as_array().unwrap().is_empty());

        let too_many = QuestQuery {
            count: Some(MAX_COUNT + 1),
            ..QuestQuery::default()
        };
        assert!(matches!(
            list_quests(State(state().await), Query(too_many)).await,
            Err(AppError::BadRequest(_))
        ));
    }
}
