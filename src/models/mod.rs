//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `cycle`: 사이클 스냅샷 (카운트다운 응답)
//! - `post`: 로어 포스트
//! - `quest`: 생성된 퀘스트
//! - `task`: 개인 할 일 항목
//! - `user`: 사용자와 스트릭 상태
//!
//! `pub use X::*;`로 재공개하여 `crate::models::User`처럼 짧게 접근합니다.

pub mod cycle;
pub mod post;
pub mod quest;
pub mod task;
pub mod user;

pub use cycle::*;
pub use post::*;
pub use quest::*;
pub use task::*;
pub use user::*;
