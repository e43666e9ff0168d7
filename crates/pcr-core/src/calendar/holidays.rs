//! NSE 휴장일 정적 테이블.
//!
//! 출처: <https://www.nseindia.com/regulations/trading-holidays>
//!
//! 날짜 정확 일치로만 조회하며 반복 규칙은 평가하지 않습니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 휴장 범위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayScope {
    /// 거래소 휴장
    Exchange,
    /// 은행 휴무
    Bank,
    /// 거래소와 은행 모두 휴무
    Both,
}

/// 캘린더 휴장일 항목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingCalendarEntry {
    /// 휴장 날짜 (거래소 현지 기준)
    pub date: NaiveDate,
    /// 휴장 사유
    pub label: String,
    /// 휴장 범위
    pub scope: HolidayScope,
}

impl fmt::Display for TradingCalendarEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.date)
    }
}

/// (연, 월, 일, 사유, 범위)
type HolidayRow = (i32, u32, u32, &'static str, HolidayScope);

const NSE_HOLIDAYS_2024: &[HolidayRow] = &[
    (2024, 1, 26, "Republic Day", HolidayScope::Both),
    (2024, 3, 8, "Maha Shivratri", HolidayScope::Both),
    (2024, 3, 25, "Holi", HolidayScope::Both),
    (2024, 3, 29, "Good Friday", HolidayScope::Both),
    (2024, 4, 11, "Id-Ul-Fitr", HolidayScope::Both),
    (2024, 4, 17, "Ram Navami", HolidayScope::Both),
    (2024, 4, 21, "Mahavir Jayanti", HolidayScope::Both),
    (2024, 5, 1, "Maharashtra Day", HolidayScope::Both),
    (2024, 6, 17, "Bakri Id", HolidayScope::Both),
    (2024, 7, 17, "Moharram", HolidayScope::Both),
    (2024, 8, 15, "Independence Day", HolidayScope::Both),
    (2024, 10, 2, "Mahatma Gandhi Jayanti", HolidayScope::Both),
    (2024, 11, 1, "Diwali-Laxmi Pujan", HolidayScope::Both),
    (2024, 11, 15, "Gurunanak Jayanti", HolidayScope::Both),
    (2024, 12, 25, "Christmas", HolidayScope::Both),
];

const NSE_HOLIDAYS_2025: &[HolidayRow] = &[
    (2025, 1, 26, "Republic Day", HolidayScope::Both),
    (2025, 3, 14, "Holi", HolidayScope::Both),
    (2025, 3, 31, "Id-Ul-Fitr (Ramadan Eid)", HolidayScope::Both),
    (2025, 4, 10, "Mahavir Jayanti", HolidayScope::Both),
    (2025, 4, 14, "Dr. Baba Saheb Ambedkar Jayanti", HolidayScope::Both),
    (2025, 4, 18, "Good Friday", HolidayScope::Both),
    (2025, 5, 1, "Maharashtra Day", HolidayScope::Both),
    (2025, 6, 7, "Bakri Id", HolidayScope::Both),
    (2025, 8, 15, "Independence Day", HolidayScope::Both),
    (2025, 8, 27, "Ganesh Chaturthi", HolidayScope::Both),
    (2025, 10, 2, "Mahatma Gandhi Jayanti", HolidayScope::Both),
    (2025, 10, 21, "Dussehra", HolidayScope::Both),
    (2025, 11, 5, "Diwali-Laxmi Pujan", HolidayScope::Both),
    (2025, 11, 6, "Diwali-Balipratipada", HolidayScope::Both),
    (2025, 11, 24, "Gurunanak Jayanti", HolidayScope::Both),
    (2025, 12, 25, "Christmas", HolidayScope::Both),
];

/// 날짜로 조회 가능한 휴장일 테이블.
///
/// 프로세스 수명 동안 한 번 만들어 불변으로 사용합니다.
#[derive(Debug, Clone, Default)]
pub struct TradingCalendar {
    entries: BTreeMap<NaiveDate, TradingCalendarEntry>,
}

impl TradingCalendar {
    /// 빈 캘린더 (주말만 휴장).
    pub fn empty() -> Self {
        Self::default()
    }

    /// 내장 NSE 휴장일 테이블로 캘린더를 생성합니다.
    pub fn nse() -> Self {
        let entries = NSE_HOLIDAYS_2024
            .iter()
            .chain(NSE_HOLIDAYS_2025)
            .filter_map(|&(year, month, day, label, scope)| {
                NaiveDate::from_ymd_opt(year, month, day).map(|date| TradingCalendarEntry {
                    date,
                    label: label.to_string(),
                    scope,
                })
            });

        Self::empty().with_entries(entries)
    }

    /// 항목을 추가한 캘린더를 반환합니다. 같은 날짜는 나중 항목이 우선합니다.
    pub fn with_entries(mut self, entries: impl IntoIterator<Item = TradingCalendarEntry>) -> Self {
        for entry in entries {
            self.entries.insert(entry.date, entry);
        }
        self
    }

    /// 해당 날짜의 휴장일 항목.
    pub fn holiday_on(&self, date: NaiveDate) -> Option<&TradingCalendarEntry> {
        self.entries.get(&date)
    }

    /// 등록된 휴장일 수.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 휴장일이 하나도 없는지 여부.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 날짜 순으로 정렬된 휴장일 목록.
    pub fn entries(&self) -> impl Iterator<Item = &TradingCalendarEntry> {
        self.entries.values()
    }
}
