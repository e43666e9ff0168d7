//! PCR collector CLI.

use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use pcr_collector::{
    CollectorConfig, OrchestratorHandle, RefreshOrchestrator, SystemClock,
};
use pcr_core::{format_session_time, init_logging, LogConfig, LogFormat, PcrConfig, EXCHANGE_TZ};

#[derive(Parser)]
#[command(name = "pcr-collector")]
#[command(about = "Market-aware Put-Call Ratio collector for NSE index options", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, global = true, default_value = "compact")]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// 데몬 모드: 장 시간에 맞춰 3분 그리드로 갱신
    Daemon,

    /// 한 주기 조회 후 스냅샷을 JSON으로 출력
    Refresh {
        /// 장 마감 중에도 조회
        #[arg(long)]
        force: bool,
    },

    /// 시장 상태 출력
    Status {
        /// 판정할 시각 (RFC3339, 기본: 현재)
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },

    /// 오늘의 그리드 시각과 다음 갱신까지 남은 시간 출력
    Schedule,

    /// 저장된 상태 삭제
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(
        LogConfig::new(format!("pcr_collector={0},pcr_core={0}", cli.log_level))
            .with_format(cli.log_format),
    )?;

    let collector = CollectorConfig::from_env()?;
    let config = PcrConfig::load(&collector.config_path)
        .with_context(|| format!("설정 로드 실패: {}", collector.config_path.display()))?;
    tracing::debug!(
        store = %collector.store.backend,
        source = %collector.source.base_url,
        symbols = ?config.symbols,
        "설정 로드 완료"
    );

    match cli.command {
        Commands::Daemon => {
            let orchestrator = build_orchestrator(&collector, &config).await?;
            let handle = OrchestratorHandle::spawn(orchestrator);
            let mut updates = handle.subscribe();

            tracing::info!("=== 데몬 모드 시작 ===");

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("종료 신호 수신, 데몬 종료 중...");
                        break;
                    }
                    changed = updates.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let snapshot = updates.borrow_and_update().clone();
                        if snapshot.is_loading {
                            continue;
                        }
                        for state in snapshot.indices.values() {
                            if let Some(latest) = state.latest() {
                                tracing::info!(
                                    symbol = %state.symbol,
                                    pcr = %latest.pcr,
                                    sentiment = %latest.sentiment,
                                    trend = %latest.trend,
                                    spot = ?state.spot_price,
                                    "현재 PCR"
                                );
                            }
                        }
                        if let Some(warning) = &snapshot.last_warning {
                            tracing::warn!("{}", warning);
                        }
                        if let Some(error) = &snapshot.last_error {
                            tracing::error!("{}", error);
                        }
                    }
                }
            }

            handle.stop().await?;
        }
        Commands::Refresh { force } => {
            let mut orchestrator = build_orchestrator(&collector, &config).await?;
            orchestrator.hydrate().await;
            let outcome = orchestrator.run_cycle(force).await;
            if outcome.stats().is_none() {
                tracing::warn!("{} (--force로 강제 조회 가능)", orchestrator.status_message());
            }
            println!("{}", serde_json::to_string_pretty(&orchestrator.snapshot())?);
        }
        Commands::Status { at } => {
            let oracle = config.oracle()?;
            let now = at.unwrap_or_else(Utc::now);
            let status = oracle.classify(now);

            println!("Time        : {}", now.with_timezone(&EXCHANGE_TZ).format("%Y-%m-%d %H:%M:%S IST"));
            println!("Phase       : {}", status.phase);
            println!("Message     : {}", status.message(oracle.hours()));
            println!("Live fetch  : {}", status.should_fetch_live_data());
            println!("Next session: {}", format_session_time(status.next_trading_session));
            println!("Last session: {}", format_session_time(status.last_trading_session));
        }
        Commands::Schedule => {
            let scheduler = config.scheduler()?;
            let times: Vec<String> = scheduler
                .grid_times()
                .iter()
                .map(|t| t.format("%H:%M").to_string())
                .collect();
            println!("Grid ({} ticks, every {} min):", times.len(), scheduler.interval_minutes());
            for row in times.chunks(10) {
                println!("  {}", row.join(" "));
            }
            match scheduler.until_next_tick(Utc::now()) {
                Some(delay) => println!("Next tick in {:.1}s", delay.as_secs_f64()),
                None => println!("No tick scheduled (outside trading window)"),
            }
        }
        Commands::Clear => {
            let store = collector.build_store().await?;
            store.clear().await?;
            tracing::info!(store = %collector.store.backend, "저장된 상태 삭제 완료");
        }
    }

    Ok(())
}

async fn build_orchestrator(
    collector: &CollectorConfig,
    config: &PcrConfig,
) -> anyhow::Result<RefreshOrchestrator> {
    let source = Arc::new(collector.build_source()?);
    let store = collector.build_store().await?;
    Ok(RefreshOrchestrator::new(
        config,
        source,
        store,
        Arc::new(SystemClock),
    )?)
}
