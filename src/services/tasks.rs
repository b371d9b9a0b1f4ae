//! # 할 일 목록(Task List) 서비스
//!
//! 개인 체크리스트의 추가/토글/삭제 로직입니다. 저장소에 대해서는 아무것도 모릅니다.
//!
//! ## 저장 방식
//! 목록 전체를 하나의 스냅샷으로 읽고 씁니다 (항목 단위 저장 없음).
//! 저장소는 `TaskSnapshotStore` 트레이트로 주입합니다:
//! - 운영: `db::kv::SqliteSnapshotStore` (kv_store 테이블의 JSON 배열, 버전 CAS)
//! - 테스트: 메모리 저장소
//!
//! ## 기본 목록(seed)
//! 저장된 스냅샷이 없으면 기본 항목 2개를 *보여주기만* 합니다.
//! - 첫 `add()`는 빈 목록에서 시작하므로 기본 항목이 섞여 저장되지 않습니다.
//! - 기본 항목을 토글/삭제하면 그때 기본 목록이 실제 항목으로 저장됩니다.
//!
//! ## 저장소 장애 시
//! - 읽기 실패: 기본 목록으로 동작하되, 읽지 못한 실제 목록을 덮어쓰지 않도록
//!   이 인스턴스는 저장소에 쓰지 않습니다.
//! - 쓰기 실패: 메모리의 목록에는 변경이 반영된 채로 남고 경고 로그만 남깁니다.
//! - 동시 수정(`AppError::Conflict`): 다른 요청이 먼저 썼다는 뜻이므로 호출자에게 돌려줍니다.

use std::future::Future;

use crate::{error::AppError, models::DailyTask};

/// 할 일 목록 스냅샷 저장소
///
/// - `get()`은 마지막으로 `put()`한 값 또는 `None`(한 번도 저장 안 됨)을 반환합니다.
/// - `put()`은 `get()` 이후 다른 쓰기가 끼어들었으면 `AppError::Conflict`를 반환할 수 있습니다.
///
/// `impl Future<...> + Send`: 트레이트 안의 async 함수를 axum 핸들러(멀티 스레드)에서
/// 쓸 수 있도록 반환 Future가 Send임을 약속합니다. 구현 쪽은 그냥 `async fn`으로 씁니다.
pub trait TaskSnapshotStore {
    fn get(&self) -> impl Future<Output = Result<Option<Vec<DailyTask>>, AppError>> + Send;
    fn put(&self, tasks: &[DailyTask]) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// 저장된 스냅샷이 없을 때 보여줄 기본 목록 (첫 실행 경험용)
pub fn seed_tasks() -> Vec<DailyTask> {
    vec![
        DailyTask {
            id: "seed-1".to_string(),
            text: "Post today's lore".to_string(),
            completed: false,
        },
        DailyTask {
            id: "seed-2".to_string(),
            text: "Join a quest".to_string(),
            completed: false,
        },
    ]
}

pub struct TaskList<S> {
    store: S,
    tasks: Vec<DailyTask>,
    /// 지금 목록이 저장되지 않은 기본 목록인지
    showing_seeds: bool,
    /// 읽기에 실패해 저장된 목록을 모르는 상태. 이때는 `put()`을 하지 않습니다.
    degraded: bool,
}

impl<S: TaskSnapshotStore> TaskList<S> {
    /// 저장소에서 목록을 읽어옵니다.
    ///
    /// - 스냅샷 없음 → 기본 목록 (표시용)
    /// - 빈 배열이 저장돼 있음 → 빈 목록 그대로
    /// - 저장소 읽기 실패 → 경고 후 기본 목록, 쓰기 중단
    pub async fn load(store: S) -> Self {
        let (tasks, showing_seeds, degraded) = match store.get().await {
            Ok(Some(tasks)) => (tasks, false, false),
            Ok(None) => (seed_tasks(), true, false),
            Err(e) => {
                tracing::warn!("Task snapshot unavailable, using defaults without saving: {}", e);
                (seed_tasks(), true, true)
            }
        };
        Self {
            store,
            tasks,
            showing_seeds,
            degraded,
        }
    }

    /// 최신 항목이 앞에 오는 순서
    pub fn list(&self) -> &[DailyTask] {
        &self.tasks
    }

    /// 대소문자를 무시한 정확한 일치: 빠른 추가 시 중복 방지용
    pub fn exists(&self, text: &str) -> bool {
        let needle = text.trim().to_lowercase();
        self.tasks.iter().any(|t| t.text.to_lowercase() == needle)
    }

    /// 새 항목을 맨 앞에 추가합니다. 공백뿐인 텍스트는 무시하고 `Ok(None)`을 반환합니다.
    ///
    /// 기본 목록을 보여주던 중이면 기본 항목을 버리고 빈 목록에서 시작합니다.
    pub async fn add(&mut self, text: &str) -> Result<Option<DailyTask>, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        if self.showing_seeds {
            self.tasks.clear();
            self.showing_seeds = false;
        }

        let task = DailyTask {
            // UUIDv7: 시간 기반이라 생성 순서대로 정렬됩니다
            id: uuid::Uuid::now_v7().to_string(),
            text: text.to_string(),
            completed: false,
        };
        self.tasks.insert(0, task.clone());
        self.persist().await?;
        Ok(Some(task))
    }

    /// `completed`를 뒤집습니다. 없는 ID면 아무것도 하지 않고 `Ok(false)`를 반환합니다.
    pub async fn toggle(&mut self, id: &str) -> Result<bool, AppError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        task.completed = !task.completed;
        // 기본 항목을 건드렸으면 이제부터 기본 목록도 실제 목록입니다
        self.showing_seeds = false;
        self.persist().await?;
        Ok(true)
    }

    /// 항목을 삭제합니다. 없는 ID면 아무것도 하지 않고 `Ok(false)`를 반환합니다.
    pub async fn delete(&mut self, id: &str) -> Result<bool, AppError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(false);
        }
        self.showing_seeds = false;
        self.persist().await?;
        Ok(true)
    }

    /// 목록 전체를 저장합니다. 동시 수정 충돌만 에러로 돌려주고, 나머지 실패는 삼킵니다.
    async fn persist(&self) -> Result<(), AppError> {
        if self.degraded {
            tracing::warn!("Task list was not read from storage, keeping changes in memory only");
            return Ok(());
        }
        match self.store.put(&self.tasks).await {
            Ok(()) => Ok(()),
            // `e @ 패턴`: 패턴이 맞으면 값 전체를 e에 바인딩합니다
            Err(e @ AppError::Conflict(_)) => Err(e),
            Err(e) => {
                tracing::warn!("Failed to persist task list, keeping in-memory state: {}", e);
                Ok(())
            }
        }
    }
}
