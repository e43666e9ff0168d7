//! 시장 상태 판단 (HoursOracle).
//!
//! 주어진 시각을 거래일/휴장일/세션 단계로 분류합니다.
//! I/O도 내부 상태도 없는 순수 함수라 얼마든지 자주 호출해도 됩니다.
//!
//! # 단계 우선순위
//!
//! 휴장일 > 주말 > 거래 시간(`trading`) > 개장 전(`pre-market`) > 마감 후(`post-market`)

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{exchange_instant, HolidayScope, TradingCalendar, TradingCalendarEntry, EXCHANGE_TZ};

/// 다음/이전 거래일 탐색 최대 일수 (연휴 대비).
pub const MAX_SESSION_SEARCH_DAYS: u64 = 30;

/// 일일 정규 거래 시간 (거래소 현지 시각).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketHours {
    /// 개장 시각
    pub open: NaiveTime,
    /// 마감 시각
    pub close: NaiveTime,
}

impl Default for MarketHours {
    fn default() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(9, 15, 0).unwrap_or(NaiveTime::MIN),
            close: NaiveTime::from_hms_opt(15, 30, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl MarketHours {
    /// 새 거래 시간을 생성합니다. 개장이 마감보다 늦으면 `None`.
    pub fn new(open: NaiveTime, close: NaiveTime) -> Option<Self> {
        (open < close).then_some(Self { open, close })
    }

    /// 분 단위로 거래 시간 이내인지 확인합니다 (개장/마감 분 포함).
    pub fn contains(&self, time: NaiveTime) -> bool {
        let minute = minute_of_day(time);
        minute_of_day(self.open) <= minute && minute <= minute_of_day(self.close)
    }

    /// 개장 분 이전인지 확인합니다.
    pub fn is_before_open(&self, time: NaiveTime) -> bool {
        minute_of_day(time) < minute_of_day(self.open)
    }
}

/// 자정 기준 경과 분.
pub(crate) fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// 세션 단계.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionPhase {
    /// 정규장 거래 중
    Trading,
    /// 거래일 개장 전
    PreMarket,
    /// 거래일 마감 후
    PostMarket,
    /// 주말
    Weekend,
    /// 거래소 휴장일
    Holiday,
    /// 은행 휴무일
    BankHoliday,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionPhase::Trading => "trading",
            SessionPhase::PreMarket => "pre-market",
            SessionPhase::PostMarket => "post-market",
            SessionPhase::Weekend => "weekend",
            SessionPhase::Holiday => "holiday",
            SessionPhase::BankHoliday => "bank-holiday",
        };
        f.write_str(s)
    }
}

/// 한 시점의 시장 상태.
///
/// 조회할 때마다 새로 계산하며 호출자가 쓰고 버리는 값입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatus {
    /// 세션 단계
    pub phase: SessionPhase,
    /// 거래 중 여부
    pub is_open: bool,
    /// 거래 시간대 여부 (요일/휴장 무관)
    pub is_market_hours: bool,
    /// 거래일 여부 (주말/휴장일 아님)
    pub is_trading_day: bool,
    /// 다음 거래 세션 개장 시각
    pub next_trading_session: DateTime<Utc>,
    /// 직전 거래 세션 마감 시각
    pub last_trading_session: DateTime<Utc>,
    /// 해당 날짜의 휴장일 정보
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday: Option<TradingCalendarEntry>,
}

impl MarketStatus {
    /// 실시간 데이터를 조회해야 하는지 여부.
    pub fn should_fetch_live_data(&self) -> bool {
        self.is_open && self.is_market_hours && self.is_trading_day
    }

    /// 화면 표시용 상태 메시지.
    pub fn message(&self, hours: &MarketHours) -> String {
        match self.phase {
            SessionPhase::Trading => {
                "Market is open - Live data updates every 3 minutes".to_string()
            }
            SessionPhase::PreMarket => format!(
                "Market opens at {}:{:02} IST",
                hours.open.hour(),
                hours.open.minute()
            ),
            SessionPhase::PostMarket => {
                "Market is closed - Showing last trading session data".to_string()
            }
            SessionPhase::Weekend => {
                "Market closed (Weekend) - Showing last trading session data".to_string()
            }
            SessionPhase::Holiday => match &self.holiday {
                Some(h) => format!(
                    "Market Holiday: {} - Showing last trading session data",
                    h.label
                ),
                None => "Market closed (Holiday) - Showing last trading session data".to_string(),
            },
            SessionPhase::BankHoliday => match &self.holiday {
                Some(h) => format!("Bank Holiday: {} - Showing last trading session data", h.label),
                None => "Bank Holiday - Showing last trading session data".to_string(),
            },
        }
    }
}

/// 캘린더와 거래 시간으로 시장 상태를 판단합니다.
#[derive(Debug, Clone)]
pub struct HoursOracle {
    calendar: TradingCalendar,
    hours: MarketHours,
}

impl Default for HoursOracle {
    fn default() -> Self {
        Self::new(TradingCalendar::nse(), MarketHours::default())
    }
}

impl HoursOracle {
    /// 새 판단기를 생성합니다.
    pub fn new(calendar: TradingCalendar, hours: MarketHours) -> Self {
        Self { calendar, hours }
    }

    /// 거래 시간 설정.
    pub fn hours(&self) -> &MarketHours {
        &self.hours
    }

    /// 휴장일 캘린더.
    pub fn calendar(&self) -> &TradingCalendar {
        &self.calendar
    }

    /// 주말도 휴장일도 아닌 날인지 확인합니다.
    pub fn is_trading_day(&self, date: NaiveDate) -> bool {
        !is_weekend(date) && self.calendar.holiday_on(date).is_none()
    }

    /// 주어진 시각의 시장 상태를 분류합니다.
    pub fn classify(&self, now: DateTime<Utc>) -> MarketStatus {
        let local = now.with_timezone(&EXCHANGE_TZ);
        let today = local.date_naive();
        let time = local.time();

        let holiday = self.calendar.holiday_on(today).cloned();
        let weekend = is_weekend(today);
        let in_hours = self.hours.contains(time);
        let is_trading_day = !weekend && holiday.is_none();

        let phase = match &holiday {
            Some(h) if h.scope == HolidayScope::Bank => SessionPhase::BankHoliday,
            Some(_) => SessionPhase::Holiday,
            None if weekend => SessionPhase::Weekend,
            None if in_hours => SessionPhase::Trading,
            None if self.hours.is_before_open(time) => SessionPhase::PreMarket,
            None => SessionPhase::PostMarket,
        };

        let next_trading_session = if is_trading_day && self.hours.is_before_open(time) {
            exchange_instant(today, self.hours.open)
        } else {
            self.next_session_open_after(today)
        };

        MarketStatus {
            phase,
            is_open: phase == SessionPhase::Trading,
            is_market_hours: in_hours,
            is_trading_day,
            next_trading_session,
            last_trading_session: self.last_session_close_before(today),
            holiday,
        }
    }

    /// `date` 다음 거래일의 개장 시각.
    ///
    /// 최대 30일까지 탐색하며, 찾지 못하면 30번째 후보일을 그대로 반환합니다.
    pub fn next_session_open_after(&self, date: NaiveDate) -> DateTime<Utc> {
        let day = self.search_trading_day(date, |d, n| d.checked_add_days(Days::new(n)));
        exchange_instant(day, self.hours.open)
    }

    /// `date` 이전 거래일의 마감 시각.
    ///
    /// 최대 30일까지 탐색하며, 찾지 못하면 30번째 후보일을 그대로 반환합니다.
    pub fn last_session_close_before(&self, date: NaiveDate) -> DateTime<Utc> {
        let day = self.search_trading_day(date, |d, n| d.checked_sub_days(Days::new(n)));
        exchange_instant(day, self.hours.close)
    }

    fn search_trading_day(
        &self,
        from: NaiveDate,
        step: impl Fn(NaiveDate, u64) -> Option<NaiveDate>,
    ) -> NaiveDate {
        let mut candidate = from;
        for offset in 1..=MAX_SESSION_SEARCH_DAYS {
            match step(from, offset) {
                Some(day) => candidate = day,
                None => break,
            }
            if self.is_trading_day(candidate) {
                return candidate;
            }
        }
        candidate
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ist(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        EXCHANGE_TZ
            .with_ymd_and_hms(y, m, d, h, min, s)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn oracle() -> HoursOracle {
        HoursOracle::default()
    }

    #[test]
    fn test_trading_phase_inside_window() {
        // 2025-10-20 (월)
        let status = oracle().classify(ist(2025, 10, 20, 10, 0, 0));
        assert_eq!(status.phase, SessionPhase::Trading);
        assert!(status.is_open);
        assert!(status.should_fetch_live_data());
    }

    #[test]
    fn test_window_edges_inclusive_by_minute() {
        let o = oracle();
        assert_eq!(o.classify(ist(2025, 10, 20, 9, 15, 0)).phase, SessionPhase::Trading);
        assert_eq!(o.classify(ist(2025, 10, 20, 15, 30, 59)).phase, SessionPhase::Trading);
        assert_eq!(o.classify(ist(2025, 10, 20, 9, 14, 59)).phase, SessionPhase::PreMarket);
        assert_eq!(o.classify(ist(2025, 10, 20, 15, 31, 0)).phase, SessionPhase::PostMarket);
    }

    #[test]
    fn test_holiday_precedes_trading_hours() {
        // 2025-10-21 (화) Dussehra
        let status = oracle().classify(ist(2025, 10, 21, 10, 0, 0));
        assert_eq!(status.phase, SessionPhase::Holiday);
        assert!(!status.is_open);
        assert!(!status.is_trading_day);
        assert!(status.is_market_hours);
        assert!(!status.should_fetch_live_data());
        assert_eq!(status.holiday.as_ref().unwrap().label, "Dussehra");
    }

    #[test]
    fn test_holiday_precedes_weekend() {
        // 2025-06-07 (토) Bakri Id
        let status = oracle().classify(ist(2025, 6, 7, 11, 0, 0));
        assert_eq!(status.phase, SessionPhase::Holiday);
    }

    #[test]
    fn test_bank_holiday_scope() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 22).unwrap();
        let calendar = TradingCalendar::nse().with_entries([TradingCalendarEntry {
            date,
            label: "Bank closing".to_string(),
            scope: HolidayScope::Bank,
        }]);
        let o = HoursOracle::new(calendar, MarketHours::default());
        let status = o.classify(ist(2025, 10, 22, 10, 0, 0));
        assert_eq!(status.phase, SessionPhase::BankHoliday);
        assert_eq!(
            status.message(o.hours()),
            "Bank Holiday: Bank closing - Showing last trading session data"
        );
    }

    #[test]
    fn test_weekend_phase() {
        // 2025-10-18 (토)
        let status = oracle().classify(ist(2025, 10, 18, 10, 0, 0));
        assert_eq!(status.phase, SessionPhase::Weekend);
        // 다음 세션: 2025-10-20 (월) 09:15
        assert_eq!(status.next_trading_session, ist(2025, 10, 20, 9, 15, 0));
        // 직전 세션: 2025-10-17 (금) 15:30
        assert_eq!(status.last_trading_session, ist(2025, 10, 17, 15, 30, 0));
    }

    #[test]
    fn test_next_session_is_today_before_open() {
        let status = oracle().classify(ist(2025, 10, 20, 8, 0, 0));
        assert_eq!(status.phase, SessionPhase::PreMarket);
        assert_eq!(status.next_trading_session, ist(2025, 10, 20, 9, 15, 0));
    }

    #[test]
    fn test_next_session_skips_holidays() {
        // 2025-10-20 (월) 마감 후 -> 10-21 Dussehra 건너뜀 -> 10-22 (수)
        let status = oracle().classify(ist(2025, 10, 20, 16, 0, 0));
        assert_eq!(status.phase, SessionPhase::PostMarket);
        assert_eq!(status.next_trading_session, ist(2025, 10, 22, 9, 15, 0));

        // 2025-11-07 (금) -> 직전 세션은 11-04 (화), 11-05/06은 디왈리
        let status = oracle().classify(ist(2025, 11, 7, 10, 0, 0));
        assert_eq!(status.last_trading_session, ist(2025, 11, 4, 15, 30, 0));
    }

    #[test]
    fn test_search_bound_returns_last_candidate() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        // 40일 연속 휴장
        let entries = (1..=40).map(|n| TradingCalendarEntry {
            date: start.checked_add_days(Days::new(n)).unwrap(),
            label: "closed".to_string(),
            scope: HolidayScope::Exchange,
        });
        let o = HoursOracle::new(TradingCalendar::empty().with_entries(entries), MarketHours::default());

        let next = o.next_session_open_after(start);
        let expected = start.checked_add_days(Days::new(30)).unwrap();
        assert_eq!(next, exchange_instant(expected, o.hours().open));
    }

    #[test]
    fn test_status_messages() {
        let o = oracle();
        let pre = o.classify(ist(2025, 10, 20, 8, 0, 0));
        assert_eq!(pre.message(o.hours()), "Market opens at 9:15 IST");

        let holiday = o.classify(ist(2025, 12, 25, 10, 0, 0));
        assert_eq!(
            holiday.message(o.hours()),
            "Market Holiday: Christmas - Showing last trading session data"
        );
    }

    #[test]
    fn test_host_timezone_independent() {
        // UTC 기준 2025-10-20 03:45 == IST 09:15
        let now = Utc.with_ymd_and_hms(2025, 10, 20, 3, 45, 0).unwrap();
        assert_eq!(oracle().classify(now).phase, SessionPhase::Trading);
    }

    #[test]
    fn test_market_hours_new_rejects_inverted() {
        let open = NaiveTime::from_hms_opt(15, 0, 0).unwrap();
        let close = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert!(MarketHours::new(open, close).is_none());
    }
}
