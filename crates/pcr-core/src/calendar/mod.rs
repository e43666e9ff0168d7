//! 거래소 캘린더 및 거래 시간 판단.
//!
//! 모든 시각 비교는 호스트 시간대와 무관하게 거래소 시간대
//! (`Asia/Kolkata`, UTC+5:30)에서 수행합니다.

mod expiry;
mod holidays;
mod oracle;

pub use expiry::*;
pub use holidays::*;
pub use oracle::*;

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// 거래소 시간대.
pub const EXCHANGE_TZ: Tz = chrono_tz::Asia::Kolkata;

/// 거래소 시간대의 UTC 오프셋 (분).
const EXCHANGE_UTC_OFFSET_MINUTES: i64 = 5 * 60 + 30;

/// 거래소 현지 날짜/시각을 UTC 시각으로 변환합니다.
pub fn exchange_instant(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    let naive = date.and_time(time);
    match EXCHANGE_TZ.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        // 고정 오프셋 시간대라 발생하지 않음
        LocalResult::None => Utc.from_utc_datetime(
            &(naive - chrono::Duration::minutes(EXCHANGE_UTC_OFFSET_MINUTES)),
        ),
    }
}

/// 거래 세션 시각을 표시용 문자열로 변환합니다 (예: "Mon, 20 Oct 2025, 09:15 IST").
pub fn format_session_time(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&EXCHANGE_TZ)
        .format("%a, %d %b %Y, %H:%M IST")
        .to_string()
}
