// Serialize: 구조체 → JSON (응답, 스냅샷 저장), Deserialize: JSON → 구조체 (요청, 스냅샷 읽기)
use serde::{Deserialize, Serialize};

/// 개인 체크리스트 항목. 목록은 최신 항목이 앞에 오는 순서를 유지합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTask {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub text: String,
    /// true면 같은 텍스트(대소문자 무시)가 이미 있을 때 409를 반환합니다
    /// #[serde(default)]: JSON에 필드가 없으면 `bool::default()`, 즉 false로 채웁니다
    #[serde(default)]
    pub unique: bool,
}

#[derive(Debug, Deserialize)]
pub struct TaskExistsQuery {
    pub text: String,
}
