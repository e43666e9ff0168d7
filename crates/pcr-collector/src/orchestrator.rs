//! 새로고침 오케스트레이터.
//!
//! 추적 중인 모든 지수에 대해 한 주기의 조회를 수행하고, 결과를 메모리
//! 상태에 반영한 뒤 저장소에 기록합니다. 지수 상태는 오케스트레이터만
//! 소유하고 변경하므로 별도의 잠금이 필요 없습니다.
//!
//! # 상태 흐름
//!
//! ```text
//! idle ─start─▶ awaiting-tick ─tick─▶ fetching ─▶ reconciling ─▶ awaiting-tick
//!                     ▲                                              │
//!                     └──────── status-check (60초, 장 시작 감지) ◀──┘
//! ```
//!
//! # 주기 반영 정책
//!
//! - 하나라도 성공: `last_update_time` 갱신, 캐시 플래그 해제, 전체 지수 저장,
//!   거래 시간 중이면 직전 세션 기록도 저장
//! - 일부 실패: 실패한 심볼을 경고로 노출하되 성공분은 유지
//! - 전부 실패: 상태를 건드리지 않고 에러만 노출
//! - 저장 실패: 로그만 남기고 메모리 상태는 유지

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use futures::future::join_all;
use pcr_core::{
    expiry_labels, format_session_time, HoursOracle, IndexState, IndexSymbol, IntervalScheduler,
    MarketStatus, MetricEngine, PcrConfig, SessionPhase, EXCHANGE_TZ,
    MAX_CACHED_SESSION_AGE_DAYS, MAX_SESSION_CAPTURE_WINDOW_MINUTES,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn, Instrument};

use crate::clock::Clock;
use crate::error::{CollectorError, Result};
use crate::source::OptionChainSource;
use crate::stats::CycleStats;
use crate::store::{IndexMap, LastSession, StateStore};

/// 캐시도 없고 장도 닫혀 있을 때 노출하는 메시지.
pub const NO_PREVIOUS_DATA_MESSAGE: &str =
    "No previous trading data available. PCR calculation will start on next trading session.";

/// 오케스트레이터 동작 설정.
#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    /// 추적 지수 목록
    pub symbols: Vec<IndexSymbol>,
    /// 상태 점검 주기
    pub status_check_interval: Duration,
    /// 마감 직후 세션 스냅샷 허용 범위
    pub session_capture_window: ChronoDuration,
    /// 직전 세션 기록을 신뢰하는 최대 기간
    pub cached_session_max_age: ChronoDuration,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self::from_config(&PcrConfig::default())
    }
}

impl OrchestratorSettings {
    pub fn from_config(config: &PcrConfig) -> Self {
        Self {
            symbols: config.symbols.clone(),
            status_check_interval: Duration::from_secs(config.schedule.status_check_interval_secs),
            session_capture_window: ChronoDuration::minutes(
                config
                    .schedule
                    .session_capture_window_minutes
                    .clamp(0, MAX_SESSION_CAPTURE_WINDOW_MINUTES),
            ),
            cached_session_max_age: ChronoDuration::days(
                config
                    .schedule
                    .cached_session_max_age_days
                    .clamp(0, MAX_CACHED_SESSION_AGE_DAYS),
            ),
        }
    }
}

/// 외부(표시 계층)에 노출되는 모니터 상태.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorSnapshot {
    pub status: MarketStatus,
    pub status_message: String,
    pub indices: IndexMap,
    pub last_update_time: Option<DateTime<Utc>>,
    pub last_trading_session: Option<DateTime<Utc>>,
    pub is_using_cached_data: bool,
    pub is_loading: bool,
    pub last_error: Option<String>,
    pub last_warning: Option<String>,
}

/// 새로고침 주기 결과.
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    /// 장이 닫혀 있어 조회하지 않음 (강제 새로고침 아님)
    Skipped { phase: SessionPhase },
    /// 조회 및 반영 완료 (성공/실패 여부는 통계 참고)
    Completed(CycleStats),
}

impl CycleOutcome {
    pub fn stats(&self) -> Option<&CycleStats> {
        match self {
            Self::Completed(stats) => Some(stats),
            Self::Skipped { .. } => None,
        }
    }
}

/// 시작 시 캐시 복원 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationSource {
    /// 최근 직전 세션 기록에서 복원
    LastSession,
    /// 지수 스냅샷에서 복원
    Snapshot,
    /// 복원할 데이터 없음
    Empty,
}

/// 상태 점검 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCheck {
    pub previous: Option<SessionPhase>,
    pub current: SessionPhase,
    /// 장 시작 감지로 즉시 조회를 수행했는지
    pub fetched: bool,
    /// 마감 직후 세션 스냅샷을 기록했는지
    pub captured_session: bool,
}

/// 새로고침 오케스트레이터.
pub struct RefreshOrchestrator {
    source: Arc<dyn OptionChainSource>,
    store: Arc<dyn StateStore>,
    clock: Arc<dyn Clock>,
    oracle: HoursOracle,
    scheduler: IntervalScheduler,
    engine: MetricEngine,
    settings: OrchestratorSettings,

    indices: IndexMap,
    last_update_time: Option<DateTime<Utc>>,
    last_trading_session: Option<DateTime<Utc>>,
    using_cached_data: bool,
    loading: bool,
    last_error: Option<String>,
    last_warning: Option<String>,
    last_phase: Option<SessionPhase>,
    cycle_count: u64,

    snapshot_tx: watch::Sender<MonitorSnapshot>,
}

impl RefreshOrchestrator {
    /// 설정과 협력 객체로 오케스트레이터를 생성합니다.
    pub fn new(
        config: &PcrConfig,
        source: Arc<dyn OptionChainSource>,
        store: Arc<dyn StateStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_parts(
            config.oracle()?,
            config.scheduler()?,
            config.metric_engine(),
            OrchestratorSettings::from_config(config),
            source,
            store,
            clock,
        ))
    }

    /// 구성 요소를 직접 지정하여 생성합니다.
    ///
    /// 중복된 심볼은 처음 나온 순서만 남깁니다.
    pub fn with_parts(
        oracle: HoursOracle,
        scheduler: IntervalScheduler,
        engine: MetricEngine,
        mut settings: OrchestratorSettings,
        source: Arc<dyn OptionChainSource>,
        store: Arc<dyn StateStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let unique = unique_symbols(&settings.symbols);
        if unique.len() != settings.symbols.len() {
            warn!(symbols = ?settings.symbols, "중복 심볼 제거");
            settings.symbols = unique;
        }
        let now = clock.now_utc();
        let indices = seed_indices(&settings.symbols, now);
        let status = oracle.classify(now);

        let (snapshot_tx, _) = watch::channel(MonitorSnapshot {
            status_message: status.message(oracle.hours()),
            status,
            indices: indices.clone(),
            last_update_time: None,
            last_trading_session: None,
            is_using_cached_data: false,
            is_loading: false,
            last_error: None,
            last_warning: None,
        });

        Self {
            source,
            store,
            clock,
            oracle,
            scheduler,
            engine,
            settings,
            indices,
            last_update_time: None,
            last_trading_session: None,
            using_cached_data: false,
            loading: false,
            last_error: None,
            last_warning: None,
            last_phase: None,
            cycle_count: 0,
            snapshot_tx,
        }
    }

    // =========================================================================
    // 조회용 접근자
    // =========================================================================

    pub fn indices(&self) -> &IndexMap {
        &self.indices
    }

    pub fn index(&self, symbol: IndexSymbol) -> Option<&IndexState> {
        self.indices.get(&symbol)
    }

    pub fn last_update_time(&self) -> Option<DateTime<Utc>> {
        self.last_update_time
    }

    pub fn last_trading_session(&self) -> Option<DateTime<Utc>> {
        self.last_trading_session
    }

    pub fn is_using_cached_data(&self) -> bool {
        self.using_cached_data
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_warning(&self) -> Option<&str> {
        self.last_warning.as_deref()
    }

    pub fn scheduler(&self) -> &IntervalScheduler {
        &self.scheduler
    }

    /// 현재 시장 상태 (호출할 때마다 새로 계산).
    pub fn status(&self) -> MarketStatus {
        self.oracle.classify(self.clock.now_utc())
    }

    pub fn status_message(&self) -> String {
        self.status().message(self.oracle.hours())
    }

    /// 현재 상태의 스냅샷.
    pub fn snapshot(&self) -> MonitorSnapshot {
        let status = self.status();
        MonitorSnapshot {
            status_message: status.message(self.oracle.hours()),
            status,
            indices: self.indices.clone(),
            last_update_time: self.last_update_time,
            last_trading_session: self.last_trading_session,
            is_using_cached_data: self.using_cached_data,
            is_loading: self.loading,
            last_error: self.last_error.clone(),
            last_warning: self.last_warning.clone(),
        }
    }

    /// 스냅샷 변경 알림 구독.
    pub fn subscribe(&self) -> watch::Receiver<MonitorSnapshot> {
        self.snapshot_tx.subscribe()
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }

    // =========================================================================
    // 수명 주기
    // =========================================================================

    /// 시작 처리.
    ///
    /// 저장소에서 캐시를 복원한 뒤, 거래 시간 중이면 즉시 한 주기를 수행합니다.
    /// 장이 닫혀 있고 복원할 데이터도 없으면 안내 메시지를 노출합니다.
    pub async fn start(&mut self) -> HydrationSource {
        let status = self.status();
        self.last_phase = Some(status.phase);
        info!(phase = %status.phase, message = %status.message(self.oracle.hours()), "오케스트레이터 시작");

        let hydrated = self.hydrate().await;

        if status.should_fetch_live_data() {
            self.run_cycle(false).await;
        } else if hydrated == HydrationSource::Empty {
            self.last_error = Some(NO_PREVIOUS_DATA_MESSAGE.to_string());
        }

        self.publish();
        hydrated
    }

    /// 저장소에서 마지막 상태를 복원합니다.
    ///
    /// 7일 이내의 직전 세션 기록을 우선하고, 없으면 지수 스냅샷을 사용합니다.
    /// 저장소 에러는 로그만 남기고 복원할 데이터가 없는 것으로 처리합니다.
    pub async fn hydrate(&mut self) -> HydrationSource {
        let now = self.clock.now_utc();

        let last_session = match self.store.load_last_session().await {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "직전 세션 기록 로드 실패");
                None
            }
        };

        if let Some(session) =
            last_session.filter(|s| s.is_recent(now, self.settings.cached_session_max_age))
        {
            info!(session = %format_session_time(session.date), "직전 거래 세션 데이터 복원");
            self.install(session.indices, now);
            self.last_update_time = Some(session.timestamp);
            self.last_trading_session = Some(session.date);
            self.using_cached_data = true;
            return HydrationSource::LastSession;
        }

        match self.store.load_indices().await {
            Ok(Some(map)) if !map.is_empty() => {
                info!(count = map.len(), "저장된 지수 스냅샷 복원");
                self.install(map, now);
                self.using_cached_data = true;
                HydrationSource::Snapshot
            }
            Ok(_) => HydrationSource::Empty,
            Err(e) => {
                warn!(error = %e, "지수 스냅샷 로드 실패");
                HydrationSource::Empty
            }
        }
    }

    /// 복원한 맵을 추적 심볼 기준으로 정리해 설치합니다.
    fn install(&mut self, mut map: IndexMap, now: DateTime<Utc>) {
        let symbols = &self.settings.symbols;
        map.retain(|symbol, _| symbols.contains(symbol));
        for state in map.values_mut() {
            state.enforce_capacity();
        }
        for (symbol, seed) in seed_indices(symbols, now) {
            map.entry(symbol).or_insert(seed);
        }
        self.indices = map;
    }

    // =========================================================================
    // 새로고침 주기
    // =========================================================================

    /// 한 주기의 조회와 반영을 수행합니다.
    ///
    /// `force`가 아니면 실시간 조회 조건(거래일, 거래 시간)을 만족할 때만 조회합니다.
    /// 모든 심볼을 동시에 조회하고 전부 끝날 때까지 기다린 뒤 반영합니다.
    pub async fn run_cycle(&mut self, force: bool) -> CycleOutcome {
        let now = self.clock.now_utc();
        let status = self.oracle.classify(now);

        if !force && !status.should_fetch_live_data() {
            debug!(phase = %status.phase, "장 마감 상태, 실시간 조회 건너뜀");
            return CycleOutcome::Skipped {
                phase: status.phase,
            };
        }

        self.cycle_count += 1;
        let cycle = self.cycle_count;
        let started = Instant::now();
        let mut stats = CycleStats::new(cycle, force);

        self.loading = true;
        self.publish();

        let fetches = self.settings.symbols.iter().copied().map(|symbol| {
            let source = Arc::clone(&self.source);
            async move { (symbol, source.fetch_raw_totals(symbol).await) }
                .instrument(pcr_core::symbol_span!("fetch", symbol, cycle))
        });
        let results = join_all(fetches).await;

        for (symbol, result) in results {
            match result {
                Ok(raw) => {
                    let state = self
                        .indices
                        .entry(symbol)
                        .or_insert_with(|| seed_state(symbol, now));
                    let sample = self.engine.derive(&raw, state.latest(), now);
                    debug!(
                        symbol = %symbol,
                        pcr = %sample.pcr,
                        sentiment = %sample.sentiment,
                        trend = %sample.trend,
                        "PCR 샘플 추가"
                    );
                    state.apply(&raw, sample);
                    stats.record_success();
                }
                Err(e) => {
                    warn!(
                        symbol = %symbol,
                        error = %e,
                        retryable = e.is_retryable(),
                        "옵션 체인 조회 실패"
                    );
                    stats.record_failure(symbol);
                }
            }
        }

        if stats.success > 0 {
            self.last_update_time = Some(now);
            self.using_cached_data = false;
            self.last_error = None;
            self.last_warning = stats
                .is_partial_failure()
                .then(|| failure_message("Failed to fetch data for", &stats.failed_symbols));
            self.persist(now, status.phase == SessionPhase::Trading).await;
        } else if stats.is_total_failure() {
            let message =
                failure_message("Failed to fetch PCR data for all indices", &stats.failed_symbols);
            error!(cycle, "{}", message);
            self.last_error = Some(message);
        }

        self.loading = false;
        stats.elapsed = started.elapsed();
        stats.log_summary();
        self.publish();

        CycleOutcome::Completed(stats)
    }

    /// 주기 결과를 저장합니다. 실패해도 메모리 상태는 유지합니다.
    async fn persist(&mut self, now: DateTime<Utc>, in_session: bool) {
        if let Err(e) = self.store.save_indices(&self.indices).await {
            warn!(error = %e, "지수 스냅샷 저장 실패");
        }

        if in_session {
            let session = LastSession {
                date: now,
                timestamp: now,
                indices: self.indices.clone(),
            };
            if let Err(e) = self.store.save_last_session(&session).await {
                warn!(error = %e, "직전 세션 기록 저장 실패");
            }
            self.last_trading_session = Some(now);
        }
    }

    // =========================================================================
    // 상태 점검
    // =========================================================================

    /// 주기적 상태 점검.
    ///
    /// 거래 단계로 진입하면 즉시 한 주기를 수행하고,
    /// 거래 단계에서 마감 후 단계로 넘어가면 직전 세션을 기록합니다.
    pub async fn check_status(&mut self) -> StatusCheck {
        let status = self.status();
        let previous = self.last_phase.replace(status.phase);

        let mut check = StatusCheck {
            previous,
            current: status.phase,
            fetched: false,
            captured_session: false,
        };

        if previous != Some(SessionPhase::Trading) && status.phase == SessionPhase::Trading {
            info!(previous = ?previous, "장 시작 감지, 즉시 새로고침");
            self.run_cycle(false).await;
            check.fetched = true;
        } else if previous == Some(SessionPhase::Trading) && status.phase == SessionPhase::PostMarket {
            check.captured_session = self.capture_session_close().await;
        }

        self.publish();
        check
    }

    /// 마지막 성공이 허용 범위 미만으로 지났다면 현재 지수 상태를 직전 세션으로 기록합니다.
    pub async fn capture_session_close(&mut self) -> bool {
        let now = self.clock.now_utc();
        let Some(last_update) = self.last_update_time else {
            return false;
        };
        if now.signed_duration_since(last_update) >= self.settings.session_capture_window {
            debug!(last_update = %last_update, "마지막 갱신이 오래되어 세션 기록 생략");
            return false;
        }

        let session = LastSession {
            date: last_update,
            timestamp: now,
            indices: self.indices.clone(),
        };
        if let Err(e) = self.store.save_last_session(&session).await {
            warn!(error = %e, "마감 세션 기록 저장 실패");
        }
        self.last_trading_session = Some(last_update);
        info!(session = %format_session_time(last_update), "마감 세션 기록");
        true
    }

    // =========================================================================
    // 타이머 루프
    // =========================================================================

    /// 다음 그리드 시각. 거래일이 아니거나 거래 시간 밖이면 `None`.
    ///
    /// `after`가 주어지면 그 시각 이후의 그리드만 고려합니다.
    pub fn next_grid_tick(&self, after: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
        let now = self.clock.now_utc();
        let reference = after.map_or(now, |t| t.max(now));
        let today = reference.with_timezone(&EXCHANGE_TZ).date_naive();
        if !self.oracle.is_trading_day(today) {
            return None;
        }
        self.scheduler.next_tick_at(reference)
    }

    /// 메인 루프.
    ///
    /// 그리드 타이머, 상태 점검 타이머, 수동 새로고침 명령을 처리합니다.
    /// 종료 신호를 받아도 진행 중인 주기는 끝까지 수행됩니다.
    async fn run(mut self, mut commands: mpsc::Receiver<Command>, shutdown: CancellationToken) {
        self.start().await;

        let check_interval = self.settings.status_check_interval;
        let mut status_ticker =
            tokio::time::interval_at(tokio::time::Instant::now() + check_interval, check_interval);
        status_ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // 예약된 그리드는 발사될 때까지 유지 (상태 점검이 먼저 깨어나도 건너뛰지 않음)
        let mut armed: Option<DateTime<Utc>> = None;
        let mut last_fired: Option<DateTime<Utc>> = None;

        loop {
            if armed.is_none() {
                armed = self.next_grid_tick(last_fired);
                if let Some(t) = armed {
                    debug!(next_tick = %t, "다음 그리드 예약");
                }
            }
            let delay = armed.map(|t| {
                t.signed_duration_since(self.clock.now_utc())
                    .to_std()
                    .unwrap_or(Duration::ZERO)
            });

            let grid_sleep = async move {
                match delay {
                    Some(d) => tokio::time::sleep(d).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("종료 신호 수신, 오케스트레이터 종료");
                    break;
                }

                _ = grid_sleep => {
                    last_fired = armed.take();
                    self.run_cycle(false).await;
                }

                _ = status_ticker.tick() => {
                    self.check_status().await;
                }

                command = commands.recv() => match command {
                    Some(Command::Refresh { force, reply }) => {
                        let outcome = self.run_cycle(force).await;
                        let _ = reply.send(outcome);
                    }
                    None => {
                        info!("명령 채널 종료, 오케스트레이터 종료");
                        break;
                    }
                },
            }
        }
    }
}

enum Command {
    Refresh {
        force: bool,
        reply: oneshot::Sender<CycleOutcome>,
    },
}

/// 백그라운드에서 실행 중인 오케스트레이터 핸들.
pub struct OrchestratorHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<MonitorSnapshot>,
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl OrchestratorHandle {
    /// 오케스트레이터를 백그라운드 태스크로 시작합니다.
    pub fn spawn(orchestrator: RefreshOrchestrator) -> Self {
        let (commands, rx) = mpsc::channel(8);
        let snapshots = orchestrator.subscribe();
        let shutdown = CancellationToken::new();
        let task = tokio::spawn(orchestrator.run(rx, shutdown.clone()));

        Self {
            commands,
            snapshots,
            shutdown,
            task,
        }
    }

    /// 수동 새로고침. `force`이면 거래 시간과 무관하게 조회합니다.
    pub async fn refresh(&self, force: bool) -> Result<CycleOutcome> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::Refresh { force, reply })
            .await
            .map_err(|_| CollectorError::Other("orchestrator is not running".to_string()))?;
        rx.await
            .map_err(|_| CollectorError::Other("orchestrator dropped refresh request".to_string()))
    }

    /// 가장 최근에 발행된 스냅샷.
    pub fn snapshot(&self) -> MonitorSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MonitorSnapshot> {
        self.snapshots.clone()
    }

    /// 타이머를 정리하고 루프가 끝날 때까지 기다립니다.
    pub async fn stop(self) -> Result<()> {
        self.shutdown.cancel();
        self.task
            .await
            .map_err(|e| CollectorError::Other(format!("orchestrator task failed: {}", e)))
    }
}

fn seed_state(symbol: IndexSymbol, now: DateTime<Utc>) -> IndexState {
    let labels = expiry_labels(now.with_timezone(&EXCHANGE_TZ).date_naive());
    IndexState::new(symbol, labels.current, labels.next)
}

fn seed_indices(symbols: &[IndexSymbol], now: DateTime<Utc>) -> IndexMap {
    symbols
        .iter()
        .map(|&symbol| (symbol, seed_state(symbol, now)))
        .collect()
}

fn unique_symbols(symbols: &[IndexSymbol]) -> Vec<IndexSymbol> {
    let mut unique = Vec::with_capacity(symbols.len());
    for &symbol in symbols {
        if !unique.contains(&symbol) {
            unique.push(symbol);
        }
    }
    unique
}

fn failure_message(prefix: &str, symbols: &[IndexSymbol]) -> String {
    let names: Vec<&str> = symbols.iter().map(|s| s.as_str()).collect();
    format!("{}: {}", prefix, names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message() {
        assert_eq!(
            failure_message(
                "Failed to fetch data for",
                &[IndexSymbol::BankNifty, IndexSymbol::FinNifty]
            ),
            "Failed to fetch data for: BANKNIFTY, FINNIFTY"
        );
    }

    #[test]
    fn test_settings_from_default_config() {
        let settings = OrchestratorSettings::default();
        assert_eq!(settings.symbols.len(), 2);
        assert_eq!(settings.status_check_interval, Duration::from_secs(60));
        assert_eq!(settings.session_capture_window, ChronoDuration::minutes(30));
        assert_eq!(settings.cached_session_max_age, ChronoDuration::days(7));
    }

    #[test]
    fn test_settings_clamp_unvalidated_durations() {
        let mut config = PcrConfig::default();
        config.schedule.session_capture_window_minutes = i64::MAX;
        config.schedule.cached_session_max_age_days = i64::MIN;

        let settings = OrchestratorSettings::from_config(&config);
        assert_eq!(
            settings.session_capture_window,
            ChronoDuration::minutes(MAX_SESSION_CAPTURE_WINDOW_MINUTES)
        );
        assert_eq!(settings.cached_session_max_age, ChronoDuration::zero());
    }

    #[test]
    fn test_unique_symbols_keeps_first_occurrence() {
        let symbols = [
            IndexSymbol::BankNifty,
            IndexSymbol::Nifty,
            IndexSymbol::BankNifty,
            IndexSymbol::Nifty,
        ];
        assert_eq!(
            unique_symbols(&symbols),
            vec![IndexSymbol::BankNifty, IndexSymbol::Nifty]
        );
    }
}
