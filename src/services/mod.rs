//! # 도메인 서비스 모듈
//!
//! HTTP나 저장소와 무관한 핵심 로직을 모아둔 모듈입니다.
//! - `cycle`: 사이클 시계와 윈도우 ID
//! - `streak`: 포스팅 시 스트릭 평가 (증가 / 유지 / 1로 리셋)
//! - `decay`: 윈도우를 놓친 스트릭을 0으로 떨어뜨리는 감쇠 정책과 스위퍼
//! - `tasks`: 개인 할 일 목록 (저장소 주입)
//! - `quest_generator`: 템플릿 기반 퀘스트 생성기
//! - `posts`: 포스트 저장 + 스트릭 갱신 트랜잭션

pub mod cycle;
pub mod decay;
pub mod posts;
pub mod quest_generator;
pub mod streak;
pub mod tasks;
