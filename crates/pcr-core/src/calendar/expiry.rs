//! 월간 만기일 계산.
//!
//! 만기일은 매월 마지막 목요일이며 휴장일 보정은 하지 않습니다.
//! 옵션 체인 응답에 만기 라벨이 없을 때 대체 값으로 사용합니다.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// 해당 월의 마지막 목요일.
pub fn last_thursday(year: i32, month: u32) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last_day = first_of_next.pred_opt()?;
    let back = (last_day.weekday().num_days_from_monday() + 7
        - Weekday::Thu.num_days_from_monday())
        % 7;
    last_day.checked_sub_days(Days::new(u64::from(back)))
}

/// `today` 기준 당월 만기일. 당월 만기가 지났으면 다음 달 만기일.
pub fn current_expiry(today: NaiveDate) -> Option<NaiveDate> {
    let this_month = last_thursday(today.year(), today.month())?;
    if today <= this_month {
        Some(this_month)
    } else {
        let (y, m) = next_month(today.year(), today.month());
        last_thursday(y, m)
    }
}

/// `current_expiry` 다음 달의 만기일.
pub fn next_expiry(today: NaiveDate) -> Option<NaiveDate> {
    let current = current_expiry(today)?;
    let (y, m) = next_month(current.year(), current.month());
    last_thursday(y, m)
}

/// 만기 라벨 형식 ("DD-MMM-YYYY", 대문자).
pub fn format_expiry_label(date: NaiveDate) -> String {
    date.format("%d-%b-%Y").to_string().to_uppercase()
}

/// 당월/차월 만기 라벨 쌍.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryLabels {
    pub current: String,
    pub next: String,
}

/// `today` 기준 만기 라벨 쌍을 계산합니다.
pub fn expiry_labels(today: NaiveDate) -> ExpiryLabels {
    let label = |d: Option<NaiveDate>| d.map(format_expiry_label).unwrap_or_default();
    ExpiryLabels {
        current: label(current_expiry(today)),
        next: label(next_expiry(today)),
    }
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_last_thursday() {
        assert_eq!(last_thursday(2025, 10), Some(date(2025, 10, 30)));
        assert_eq!(last_thursday(2025, 11), Some(date(2025, 11, 27)));
        assert_eq!(last_thursday(2025, 12), Some(date(2025, 12, 25)));
        // 말일이 목요일인 경우
        assert_eq!(last_thursday(2025, 7), Some(date(2025, 7, 31)));
        assert_eq!(last_thursday(2024, 2), Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_current_expiry_rolls_after_expiry_day() {
        assert_eq!(current_expiry(date(2025, 10, 20)), Some(date(2025, 10, 30)));
        // 만기 당일은 당월 유지
        assert_eq!(current_expiry(date(2025, 10, 30)), Some(date(2025, 10, 30)));
        assert_eq!(current_expiry(date(2025, 10, 31)), Some(date(2025, 11, 27)));
    }

    #[test]
    fn test_next_expiry_crosses_year() {
        assert_eq!(next_expiry(date(2025, 12, 1)), Some(date(2026, 1, 29)));
        assert_eq!(next_expiry(date(2025, 12, 26)), Some(date(2026, 2, 26)));
    }

    #[test]
    fn test_expiry_labels() {
        let labels = expiry_labels(date(2025, 10, 20));
        assert_eq!(labels.current, "30-OCT-2025");
        assert_eq!(labels.next, "27-NOV-2025");
        assert_eq!(format_expiry_label(date(2026, 1, 1)), "01-JAN-2026");
    }
}
