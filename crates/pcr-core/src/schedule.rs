//! 개장 시각 기준 동기화 그리드 스케줄러.
//!
//! 새로고침 시각은 개장 시각에서 시작해 고정 간격(기본 3분)으로 이어지는
//! 그리드 위에 놓입니다. 프로세스 시작 시각과 무관하게 벽시계 경계에
//! 맞춰지므로 재시작해도 주기가 어긋나지 않습니다.

use chrono::{DateTime, Duration, NaiveTime, Timelike, Utc};

use crate::calendar::{exchange_instant, minute_of_day, MarketHours, EXCHANGE_TZ};

/// 기본 새로고침 간격 (분).
pub const DEFAULT_REFRESH_INTERVAL_MINUTES: u32 = 3;

/// 그리드 기반 새로고침 스케줄러.
#[derive(Debug, Clone, Copy)]
pub struct IntervalScheduler {
    hours: MarketHours,
    interval_minutes: u32,
}

impl Default for IntervalScheduler {
    fn default() -> Self {
        Self::new(MarketHours::default(), DEFAULT_REFRESH_INTERVAL_MINUTES)
    }
}

impl IntervalScheduler {
    /// 새 스케줄러를 생성합니다. 간격이 0이면 1분으로 보정합니다.
    pub fn new(hours: MarketHours, interval_minutes: u32) -> Self {
        Self {
            hours,
            interval_minutes: interval_minutes.max(1),
        }
    }

    /// 새로고침 간격 (분).
    pub fn interval_minutes(&self) -> u32 {
        self.interval_minutes
    }

    fn interval(&self) -> Duration {
        Duration::minutes(i64::from(self.interval_minutes))
    }

    /// `now` 이후 첫 그리드 시각.
    ///
    /// 거래 시간 밖이거나 다음 그리드 시각이 마감 이후라면 `None`.
    pub fn next_tick_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let today = now.with_timezone(&EXCHANGE_TZ).date_naive();
        let open = exchange_instant(today, self.hours.open);
        let close = exchange_instant(today, self.hours.close);

        if now < open || now >= close {
            return None;
        }

        let interval_ms = self.interval().num_milliseconds();
        let elapsed_ms = (now - open).num_milliseconds();
        let steps = elapsed_ms / interval_ms + 1;
        let next = open + Duration::milliseconds(steps * interval_ms);

        (next < close).then_some(next)
    }

    /// 다음 그리드 시각까지 남은 시간.
    pub fn until_next_tick(&self, now: DateTime<Utc>) -> Option<std::time::Duration> {
        let next = self.next_tick_at(now)?;
        (next - now).to_std().ok()
    }

    /// 초 단위로 정확히 그리드 시각인지 확인합니다.
    pub fn is_on_grid(&self, now: DateTime<Utc>) -> bool {
        let time = now.with_timezone(&EXCHANGE_TZ).time();
        if time.second() != 0 || !self.hours.contains(time) {
            return false;
        }
        let since_open = minute_of_day(time) - minute_of_day(self.hours.open);
        since_open % self.interval_minutes == 0
    }

    /// 개장부터 마감까지(마감 포함) 그리드 시각 목록.
    pub fn grid_times(&self) -> Vec<NaiveTime> {
        let open = minute_of_day(self.hours.open);
        let close = minute_of_day(self.hours.close);

        (open..=close)
            .step_by(self.interval_minutes as usize)
            .filter_map(|m| NaiveTime::from_hms_opt(m / 60, m % 60, 0))
            .collect()
    }
}
