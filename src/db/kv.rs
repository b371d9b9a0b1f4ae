//! # 키-값 스냅샷 저장소
//!
//! `kv_store` 테이블에 문자열 키 → 문자열 값을 저장합니다.
//! 쓰기는 값 전체를 한 번에 교체하므로 부분 쓰기가 없습니다.
//!
//! ## 버전과 비교-교체(CAS)
//! 행마다 `version` 컬럼이 있고, 쓸 때마다 1씩 올라갑니다.
//! 읽을 때 본 버전과 쓸 때의 버전이 다르면 (그 사이 다른 요청이 먼저 썼으면)
//! 쓰기를 거부합니다. 스트릭 저장(`db::users::update_streak`)과 같은 방식입니다.
//!
//! 할 일 목록은 사용자마다 `daily_tasks:{user_id}` 키에 JSON 배열로 저장됩니다.

use std::sync::atomic::{AtomicI64, Ordering};

use crate::error::AppError;
use crate::models::DailyTask;
use crate::services::tasks::TaskSnapshotStore;
use sqlx::SqlitePool;

/// 값과 그 버전을 읽습니다. 키가 없으면 `None`.
pub async fn get_entry(pool: &SqlitePool, key: &str) -> Result<Option<(String, i64)>, AppError> {
    // query_as::<_, (String, i64)>: 튜플도 FromRow를 구현하므로 구조체 없이 바로 받을 수 있습니다
    let entry = sqlx::query_as::<_, (String, i64)>("SELECT value, version FROM kv_store WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    Ok(entry)
}

/// 읽을 당시의 버전이 그대로일 때만 값을 씁니다.
///
/// - `expected == None`: 키가 아직 없을 때만 새로 삽입 (버전 0)
/// - `expected == Some(v)`: 현재 버전이 `v`일 때만 교체 (버전 `v + 1`)
///
/// 성공하면 새 버전을, 다른 쓰기에 밀렸으면 `None`을 반환합니다.
pub async fn put_if_version(
    pool: &SqlitePool,
    key: &str,
    value: &str,
    expected: Option<i64>,
) -> Result<Option<i64>, AppError> {
    let result = match expected {
        None => {
            sqlx::query(
                r#"
                INSERT INTO kv_store (key, value, version) VALUES (?, ?, 0)
                ON CONFLICT(key) DO NOTHING
                "#,
            )
            .bind(key)
            .bind(value)
            .execute(pool)
            .await?
        }
        Some(version) => {
            sqlx::query(
                r#"
                UPDATE kv_store
                SET value = ?,
                    version = version + 1,
                    updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                WHERE key = ? AND version = ?
                "#,
            )
            .bind(value)
            .bind(key)
            .bind(version)
            .execute(pool)
            .await?
        }
    };

    if result.rows_affected() == 1 {
        Ok(Some(expected.map_or(0, |v| v + 1)))
    } else {
        Ok(None)
    }
}

/// 아직 읽지 않았거나 행이 없음을 나타내는 버전 값 (실제 버전은 0부터 시작)
const NO_ENTRY: i64 = -1;

/// SQLite 기반 할 일 목록 스냅샷 저장소
///
/// 마지막으로 읽거나 쓴 버전을 기억해 두었다가 `put()`에서 CAS 조건으로 씁니다.
/// 요청마다 새로 만들어 쓰는 짧은 수명의 값입니다.
pub struct SqliteSnapshotStore {
    pool: SqlitePool,
    key: String,
    // AtomicI64: `&self`만으로 값을 바꿀 수 있는 내부 가변성(interior mutability) 타입.
    // 트레이트 메서드가 `&self`를 받기 때문에 Mutex 대신 잠금 없는 원자 정수를 씁니다.
    version: AtomicI64,
}

impl SqliteSnapshotStore {
    pub fn daily_tasks(pool: SqlitePool, user_id: &str) -> Self {
        Self {
            pool,
            key: format!("daily_tasks:{user_id}"),
            version: AtomicI64::new(NO_ENTRY),
        }
    }

    fn expected_version(&self) -> Option<i64> {
        match self.version.load(Ordering::Acquire) {
            NO_ENTRY => None,
            v => Some(v),
        }
    }
}

impl TaskSnapshotStore for SqliteSnapshotStore {
    async fn get(&self) -> Result<Option<Vec<DailyTask>>, AppError> {
        match get_entry(&self.pool, &self.key).await? {
            Some((json, version)) => {
                self.version.store(version, Ordering::Release);
                Ok(Some(serde_json::from_str(&json)?))
            }
            None => {
                self.version.store(NO_ENTRY, Ordering::Release);
                Ok(None)
            }
        }
    }

    async fn put(&self, tasks: &[DailyTask]) -> Result<(), AppError> {
        let json = serde_json::to_string(tasks)?;
        match put_if_version(&self.pool, &self.key, &json, self.expected_version()).await? {
            Some(version) => {
                self.version.store(version, Ordering::Release);
                Ok(())
            }
            None => Err(AppError::Conflict(
                "Task list was changed by another request, reload and retry".to_string(),
            )),
        }
    }
}
