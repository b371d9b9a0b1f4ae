//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `HOST`: 서버 바인딩 주소 (기본값: "0.0.0.0")
//! - `PORT`: 서버 포트 번호 (기본값: 3000)
//! - `CYCLE_MODE`: `production`(로컬 자정 기준 24시간) 또는 `accelerated`(고정 N분)
//! - `CYCLE_MINUTES`: 가속 모드의 윈도우 길이 (기본값: 2)
//! - `CYCLE_UTC_OFFSET_MINUTES`: 프로덕션 모드의 "로컬 자정" 기준 오프셋
//!   (기본값: 서버 호스트의 현재 로컬 오프셋, 예: KST는 540)
//! - `STREAK_DECAY_SCOPE`: 수동 감쇠 적용 범위 `demo` | `all` | `none` (기본값: demo)

// chrono: FixedOffset(UTC와의 고정 시차), Local(서버 로컬 시간대), Offset(.fix() 메서드용 트레이트)
use chrono::{FixedOffset, Local, Offset};
// std::env: 표준 라이브러리의 환경변수 모듈
use std::env;
// thiserror::Error: `#[error("...")]` 어트리뷰트로 Display/Error 구현을 자동 생성하는 derive 매크로
use thiserror::Error;

// `crate::`는 현재 크레이트의 루트(main.rs)에서 시작하는 절대 경로입니다.
use crate::services::cycle::CycleMode;
use crate::services::decay::DecayScope;

/// 설정 로딩 에러
///
/// `#[error("... {0}")]`의 `{0}`은 튜플 변형의 첫 번째 필드,
/// `{key}`는 구조체 변형의 `key` 필드를 가리킵니다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

// #[derive(...)]: 컴파일러가 트레이트 구현을 자동으로 생성합니다.
// - Debug: {:?} 포맷으로 출력 가능
// - Clone: .clone()으로 복제 가능
/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후 main에서 각 구성 요소에 나눠 줍니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/lorecycle.db?mode=rwc")
    pub database_url: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    /// u16: 0~65535 범위의 부호 없는 16비트 정수. 포트 번호에 딱 맞는 타입입니다.
    pub port: u16,
    /// 사이클 시계에 주입할 모드: 전역 토글 대신 명시적인 설정값
    pub cycle_mode: CycleMode,
    /// 스트릭 수동 감쇠를 적용할 계정 범위
    pub decay_scope: DecayScope,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// `DATABASE_URL`만 필수입니다. 나머지는 기본값이 있지만,
    /// 값이 있는데 잘못된 경우(예: `CYCLE_MODE=weekly`)는 조용히 넘기지 않고 에러를 냅니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 테스트에서 환경변수 대신 임의의 조회 함수를 쓸 수 있게 분리했습니다.
    ///
    /// `impl Fn(&str) -> Option<String>`: "문자열 키를 받아 값을 돌려주는 아무 함수/클로저"를
    /// 받는다는 뜻입니다. 운영에서는 `env::var`, 테스트에서는 HashMap 조회를 넘깁니다.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // ok_or(): Option을 Result로 바꿉니다. None이면 주어진 에러가 됩니다.
        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        // 포트 파싱 실패는 기본값으로 대체합니다
        let port = get("PORT").and_then(|p| p.parse().ok()).unwrap_or(3000);

        // as_deref(): Option<String> → Option<&str>로 바꿔 문자열 리터럴과 match할 수 있게 합니다
        let cycle_mode = match get("CYCLE_MODE").as_deref().map(str::trim) {
            None | Some("") | Some("production") => {
                let offset = match get("CYCLE_UTC_OFFSET_MINUTES") {
                    Some(raw) => parse_offset(&raw)?,
                    None => Local::now().offset().fix(),
                };
                CycleMode::Calendar { offset }
            }
            Some("accelerated") => {
                let minutes = match get("CYCLE_MINUTES") {
                    Some(raw) => raw
                        .trim()
                        .parse::<u32>()
                        .ok()
                        .filter(|m| *m > 0)
                        .ok_or(ConfigError::Invalid {
                            key: "CYCLE_MINUTES",
                            value: raw.clone(),
                        })?,
                    None => 2,
                };
                CycleMode::accelerated(minutes)
            }
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "CYCLE_MODE",
                    value: other.to_string(),
                })
            }
        };

        let decay_scope = match get("STREAK_DECAY_SCOPE") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "STREAK_DECAY_SCOPE",
                value: raw.clone(),
            })?,
            None => DecayScope::default(),
        };

        Ok(Self {
            database_url,
            host,
            port,
            cycle_mode,
            decay_scope,
        })
    }
}

fn parse_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .and_then(|minutes| minutes.checked_mul(60))
        .and_then(FixedOffset::east_opt)
        .ok_or(ConfigError::Invalid {
            key: "CYCLE_UTC_OFFSET_MINUTES",
            value: raw.to_string(),
        })
}
