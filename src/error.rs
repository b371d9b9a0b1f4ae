//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! 참고: 사이클/스트릭/퀘스트 생성기 같은 순수 로직은 에러를 반환하지 않습니다.
//! 빈 입력이나 알 수 없는 카테고리는 "아무 일도 없음" 또는 빈 결과로 처리됩니다.
//! 여기의 에러는 대부분 HTTP 경계와 저장소에서만 발생합니다.

// StatusCode: HTTP 상태 코드 상수 (NOT_FOUND, CONFLICT 등)
// IntoResponse / Response: "HTTP 응답으로 변환 가능한 타입" 트레이트와 실제 응답 타입
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json; // json! 매크로: JSON 리터럴로 에러 본문을 만듭니다
use thiserror::Error;

// #[derive(Debug, Error)]:
// - Debug: {:?} 포맷 출력 (로그에 에러 내용을 남길 때 사용)
// - Error: thiserror가 `#[error("...")]` 메시지로 Display와 std::error::Error를 구현합니다
/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 잘못된 요청 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 리소스 충돌 (HTTP 409), 예: 중복 할 일 추가, 중복 사용자 이름, 다른 요청이 먼저 쓴 할 일 목록
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx::Error → AppError::Database 자동 변환 (`?` 연산자 사용 가능)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JSON 직렬화 오류 (HTTP 500): 할 일 스냅샷 인코딩/디코딩 실패
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// IntoResponse: axum이 "이 타입을 HTTP 응답으로 바꿀 수 있다"고 인식하는 트레이트.
// 구현해 두면 핸들러가 `Err(AppError::NotFound)`를 반환하는 것만으로 404 응답이 나갑니다.
impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, Serialization, Internal)는 실제 에러 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        // match로 변형마다 (상태 코드, 에러 코드, 메시지) 튜플을 만듭니다.
        // `ref msg`: 값을 이동(move)하지 않고 참조로 빌려옵니다 (self를 아래에서 계속 쓰기 위해).
        let (status, code, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Serialization(ref e) => {
                tracing::error!("Serialization error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "serialization_error",
                    "A serialization error occurred".to_string(),
                )
            }
        };

        // 결과: { "error": { "code": "not_found", "message": "Resource not found" } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_variant() {
        assert_eq!(AppError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Conflict("dup".into()).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Internal("boom".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
