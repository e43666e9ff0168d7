//! 파일 기반 설정 관리.
//!
//! 기본값 → TOML 파일 → `PCR__` 접두사 환경 변수 순으로 덮어씁니다.
//!
//! ```toml
//! symbols = ["NIFTY", "BANKNIFTY", "FINNIFTY"]
//!
//! [market]
//! open = "09:15"
//! close = "15:30"
//!
//! [schedule]
//! refresh_interval_minutes = 3
//!
//! [[holidays]]
//! date = "2026-01-26"
//! label = "Republic Day"
//! scope = "both"
//! ```

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::calendar::{HoursOracle, MarketHours, TradingCalendar, TradingCalendarEntry};
use crate::error::{PcrError, PcrResult};
use crate::metrics::{MetricEngine, SentimentThresholds};
use crate::schedule::{IntervalScheduler, DEFAULT_REFRESH_INTERVAL_MINUTES};
use crate::IndexSymbol;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/pcr.toml";

/// 마감 세션 스냅샷 허용 범위 상한 (분).
pub const MAX_SESSION_CAPTURE_WINDOW_MINUTES: i64 = 24 * 60;

/// 캐시된 직전 세션 신뢰 기간 상한 (일).
pub const MAX_CACHED_SESSION_AGE_DAYS: i64 = 366;

/// 모니터링 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PcrConfig {
    /// 추적 지수 목록
    pub symbols: Vec<IndexSymbol>,
    /// 거래 시간
    pub market: MarketConfig,
    /// 스케줄 설정
    pub schedule: ScheduleConfig,
    /// 심리/추세 임계값
    pub thresholds: SentimentThresholds,
    /// 내장 휴장일 테이블에 추가할 항목
    pub holidays: Vec<TradingCalendarEntry>,
}

impl Default for PcrConfig {
    fn default() -> Self {
        Self {
            symbols: IndexSymbol::DEFAULT_TRACKED.to_vec(),
            market: MarketConfig::default(),
            schedule: ScheduleConfig::default(),
            thresholds: SentimentThresholds::default(),
            holidays: Vec::new(),
        }
    }
}

/// 거래 시간 설정 ("HH:MM", 거래소 현지 시각).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MarketConfig {
    pub open: String,
    pub close: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            open: "09:15".to_string(),
            close: "15:30".to_string(),
        }
    }
}

impl MarketConfig {
    /// 거래 시간으로 변환합니다.
    pub fn hours(&self) -> PcrResult<MarketHours> {
        let open = parse_hhmm(&self.open)?;
        let close = parse_hhmm(&self.close)?;
        MarketHours::new(open, close).ok_or_else(|| {
            PcrError::Config(format!(
                "market open {} must be before close {}",
                self.open, self.close
            ))
        })
    }
}

/// 스케줄 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// 그리드 간격 (분)
    pub refresh_interval_minutes: u32,
    /// 상태 점검 주기 (초)
    pub status_check_interval_secs: u64,
    /// 마감 직후 세션 스냅샷 허용 범위 (분)
    pub session_capture_window_minutes: i64,
    /// 캐시된 직전 세션을 신뢰하는 최대 일수
    pub cached_session_max_age_days: i64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            refresh_interval_minutes: DEFAULT_REFRESH_INTERVAL_MINUTES,
            status_check_interval_secs: 60,
            session_capture_window_minutes: 30,
            cached_session_max_age_days: 7,
        }
    }
}

impl PcrConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다. 파일이 없으면 기본값을 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> PcrResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("PCR")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("symbols")
                    .try_parsing(true),
            );

        let config: PcrConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> PcrResult<Self> {
        Self::load(DEFAULT_CONFIG_PATH)
    }

    /// 값의 일관성을 검증합니다.
    pub fn validate(&self) -> PcrResult<()> {
        if self.symbols.is_empty() {
            return Err(PcrError::Config("at least one symbol must be tracked".to_string()));
        }
        if let Some(duplicate) = self
            .symbols
            .iter()
            .enumerate()
            .find_map(|(i, symbol)| self.symbols[..i].contains(symbol).then_some(symbol))
        {
            return Err(PcrError::Config(format!("symbol {} is listed more than once", duplicate)));
        }
        self.market.hours()?;
        if self.schedule.refresh_interval_minutes == 0 {
            return Err(PcrError::Config("refresh_interval_minutes must be > 0".to_string()));
        }
        if self.schedule.status_check_interval_secs == 0 {
            return Err(PcrError::Config("status_check_interval_secs must be > 0".to_string()));
        }
        let window = self.schedule.session_capture_window_minutes;
        if !(1..=MAX_SESSION_CAPTURE_WINDOW_MINUTES).contains(&window) {
            return Err(PcrError::Config(format!(
                "session_capture_window_minutes must be within 1..={}, got {}",
                MAX_SESSION_CAPTURE_WINDOW_MINUTES, window
            )));
        }
        let max_age = self.schedule.cached_session_max_age_days;
        if !(1..=MAX_CACHED_SESSION_AGE_DAYS).contains(&max_age) {
            return Err(PcrError::Config(format!(
                "cached_session_max_age_days must be within 1..={}, got {}",
                MAX_CACHED_SESSION_AGE_DAYS, max_age
            )));
        }
        if self.thresholds.bearish >= self.thresholds.bullish {
            return Err(PcrError::Config(format!(
                "bearish threshold {} must be below bullish threshold {}",
                self.thresholds.bearish, self.thresholds.bullish
            )));
        }
        Ok(())
    }

    /// 내장 NSE 테이블에 추가 휴장일을 병합한 판단기.
    pub fn oracle(&self) -> PcrResult<HoursOracle> {
        let calendar = TradingCalendar::nse().with_entries(self.holidays.iter().cloned());
        Ok(HoursOracle::new(calendar, self.market.hours()?))
    }

    pub fn scheduler(&self) -> PcrResult<IntervalScheduler> {
        Ok(IntervalScheduler::new(
            self.market.hours()?,
            self.schedule.refresh_interval_minutes,
        ))
    }

    pub fn metric_engine(&self) -> MetricEngine {
        MetricEngine::with_thresholds(self.thresholds)
    }
}

fn parse_hhmm(value: &str) -> PcrResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|e| PcrError::Config(format!("invalid time '{}': {}", value, e)))
}
