//! 주입 가능한 시계.
//!
//! 오케스트레이터는 현재 시각을 항상 [`Clock`]을 통해 얻습니다.
//! 테스트는 [`ManualClock`]으로 임의 시각을 재현합니다.

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 수동으로 설정하는 시계.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, when: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = when;
    }

    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn now_utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manual_clock() {
        let start = Utc.with_ymd_and_hms(2025, 10, 20, 4, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        assert_eq!(clock.now_utc(), start);

        clock.advance(Duration::minutes(3));
        assert_eq!(clock.now_utc(), start + Duration::minutes(3));

        clock.set(start);
        assert_eq!(clock.now_utc(), start);
    }
}
