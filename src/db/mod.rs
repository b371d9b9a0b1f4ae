//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `kv`: 키-값 스냅샷 저장소 (할 일 목록)
//! - `posts`: 로어 포스트
//! - `users`: 사용자와 스트릭 상태

pub mod kv;
pub mod posts;
pub mod users;

pub use kv::*;
pub use posts::*;
pub use users::*;

/// 테스트용 인메모리 DB: 실제 마이그레이션을 적용합니다.
///
/// `sqlite::memory:`는 연결마다 별도 DB가 생기므로 연결을 1개로 제한합니다.
#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}
