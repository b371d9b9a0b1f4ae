//! # Lorecycle 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행
//! 5. 사이클 시계 생성 + 스트릭 소멸(decay) 백그라운드 작업 시작
//! 6. API 라우터 설정
//! 7. HTTP 서버 시작

// ── 모듈 선언 ──
// `mod config;`는 같은 디렉토리의 `config.rs`(또는 `config/mod.rs`)를 모듈로 가져옵니다.
// 파일 시스템 구조가 곧 모듈 구조입니다.
mod config;
mod db;
mod error;
mod models;
mod routes;
mod services;

// ── 외부 크레이트 및 모듈에서 필요한 항목 가져오기 ──
use anyhow::Result; // anyhow::Result: 어떤 에러 타입이든 `?`로 전파할 수 있는 범용 Result
use axum::Router; // 라우터: URL 경로와 핸들러를 연결하는 구조체
use config::Config; // 환경변수에서 읽은 설정
use routes::AppState; // 모든 핸들러가 공유하는 상태 (DB 풀 + 사이클 시계)
use services::cycle::CycleClock; // 윈도우 경계 계산기
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions}; // SQLite 연결 옵션과 풀 설정
use std::str::FromStr; // 문자열 → 타입 변환 트레이트 (SqliteConnectOptions::from_str에 필요)
use tower_http::{
    cors::{Any, CorsLayer}, // CORS(Cross-Origin Resource Sharing) 설정
    trace::TraceLayer,      // HTTP 요청/응답 로깅 미들웨어
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt}; // 로깅 초기화 유틸리티

// #[tokio::main]: 비동기 런타임(Tokio)을 만들고 그 안에서 main을 실행하는 어트리뷰트 매크로.
// main()은 원래 동기 함수이므로 .await를 쓰려면 런타임이 필요합니다.
#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅 초기화 ──
    // RUST_LOG가 없으면 lorecycle, tower_http, axum을 debug 레벨로
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lorecycle=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    // `?`: Err이면 즉시 main에서 반환(에러 전파), Ok이면 안의 값을 꺼냅니다.
    // ConfigError는 std::error::Error를 구현하므로 anyhow::Error로 자동 변환됩니다.
    let config = Config::from_env()?;
    tracing::info!(
        "Starting Lorecycle server on {}:{} ({} cycle, decay scope {:?})",
        config.host,
        config.port,
        config.cycle_mode.name(),
        config.decay_scope
    );

    // ── 4단계: SQLite 연결 풀 생성 ──
    // 파일이 없으면 새로 만들고, 사용자 삭제 시 포스트도 지워지도록 외래 키를 켭니다.
    let connect_options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    // 연결 풀: 연결을 미리 만들어 두고 요청마다 빌려 쓰고 돌려받습니다.
    let pool = SqlitePoolOptions::new()
        .max_connections(5) // 최대 5개의 동시 연결
        .connect_with(connect_options)
        .await?;

    // ── 5단계: 마이그레이션 ──
    tracing::info!("Running database migrations...");
    // sqlx::migrate!: 컴파일 타임에 ./migrations 폴더의 SQL 파일을 바이너리에 포함시키는 매크로.
    // 아직 실행되지 않은 마이그레이션만 순서대로 실행합니다.
    sqlx::migrate!("./migrations").run(&pool).await?;

    // ── 6단계: 사이클 시계 + 스트릭 소멸 작업 ──
    // 시계는 Copy 타입이라 핸들러 상태와 백그라운드 작업이 각자 한 벌씩 가집니다.
    let clock = CycleClock::new(config.cycle_mode);
    let cycle = clock.snapshot(chrono::Utc::now());
    tracing::info!(
        "Current window {} started at {}, next reset at {}",
        cycle.window_id,
        cycle.window_start,
        cycle.next_reset
    );
    // pool.clone(): SqlitePool은 내부적으로 Arc라서 복제해도 같은 풀을 가리킵니다.
    // 반환되는 JoinHandle은 버립니다. 태스크는 서버가 살아 있는 동안 계속 돕니다.
    services::decay::spawn_sweeper(pool.clone(), clock, config.decay_scope);

    // ── 7단계: 라우터 ──
    let state = AppState { pool, clock };

    // 개발 환경용으로 모든 출처/메서드/헤더를 허용합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)  // 모든 출처(origin) 허용
        .allow_methods(Any) // 모든 HTTP 메서드 허용
        .allow_headers(Any); // 모든 헤더 허용

    let app = Router::new()
        // .nest(): API 라우트를 /api/v1 아래에 중첩 (예: /cycle → /api/v1/cycle)
        .nest("/api/v1", routes::api_router(state))
        // .layer(): 요청/응답을 가로채는 미들웨어를 추가합니다
        .layer(cors)
        .layer(TraceLayer::new_for_http()); // HTTP 요청/응답 자동 로깅

    // ── 8단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // 이 줄에서 서버가 종료될 때까지(Ctrl+C) 요청을 처리합니다.
    axum::serve(listener, app).await?;

    // Ok(()): 성공을 나타내는 Result 값. ()는 "빈 값"(unit 타입)입니다.
    Ok(())
}
