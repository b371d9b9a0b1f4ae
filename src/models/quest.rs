//! # 생성된 퀘스트(Generated Quest) 모델
//!
//! 생성기가 매 호출마다 새로 만들어내는 표시용 레코드입니다.
//! 저장되거나 수정되지 않습니다.
//!
//! ## 모드(Mode)
//! - `CANON`: 예정된/큐레이션된 퀘스트, 보상이 가장 큼
//! - `SPONTY`: 즉흥 퀘스트, 좌표와 호스트 캡처 URL이 붙음
//! - `RANDOM`: 채우기용, 보상이 가장 작음

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuestMode {
    Canon,
    Sponty,
    Random,
}

impl QuestMode {
    pub const ALL: [QuestMode; 3] = [QuestMode::Canon, QuestMode::Sponty, QuestMode::Random];
}

/// 참가 인원이 가득 차면 ACTIVE, 아니면 DISCOVERABLE (파생 값)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuestStatus {
    Active,
    Discoverable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedQuest {
    pub id: String,
    pub category: String,
    pub activity: String,
    pub title: String,
    pub description: String,
    pub mode: QuestMode,
    pub start_time: NaiveDateTime,
    /// 4 ~ 12
    pub max_participants: u32,
    /// 1 ~ max_participants - 1
    pub current_participants: u32,
    pub status: QuestStatus,
    pub fee: u32,
    pub aura_reward: u32,
    pub exp_reward: u32,
    /// SPONTY 모드에만 존재
    pub location: Option<GeoPoint>,
    /// SPONTY 모드에만 존재
    pub host_capture_url: Option<String>,
}

/// 생성기 입력
#[derive(Debug, Clone)]
pub struct QuestRequest {
    /// 카테고리 이름 또는 "All"
    pub category: String,
    pub date: NaiveDate,
    pub count: usize,
    /// 없으면 레코드마다 모드를 무작위로 고릅니다
    pub mode: Option<QuestMode>,
}

/// `GET /api/v1/quests`의 쿼리 파라미터
/// 예: `?category=Sports&date=2026-10-19&count=10&type=CANON`
#[derive(Debug, Default, Deserialize)]
pub struct QuestQuery {
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub count: Option<usize>,
    /// `type`은 Rust 예약어라서 필드 이름을 바꿔 매핑합니다
    #[serde(rename = "type")]
    pub mode: Option<QuestMode>,
}
