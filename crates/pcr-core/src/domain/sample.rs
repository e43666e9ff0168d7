//! 옵션 체인 집계값과 파생 PCR 샘플.
//!
//! - `RawOptionTotals` - 한 번의 조회에서 얻은 원시 집계 (일시적)
//! - `MetricSample` - 원시 집계에서 파생된 불변 샘플 (히스토리에 추가만 됨)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 옵션 체인 한 번 조회의 원시 집계값.
///
/// 업스트림 피드가 보낸 값을 그대로 담으며, 정수 반올림은
/// 파생 단계에서 수행합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOptionTotals {
    /// 콜 옵션 총 미결제약정
    pub total_call_open_interest: f64,
    /// 풋 옵션 총 미결제약정
    pub total_put_open_interest: f64,
    /// 콜 옵션 총 거래량
    pub total_call_volume: f64,
    /// 풋 옵션 총 거래량
    pub total_put_volume: f64,
    /// 기초 지수 현재가
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot_price: Option<f64>,
    /// 근월물 만기 라벨 (예: "30-OCT-2025")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_expiry_label: Option<String>,
    /// 차월물 만기 라벨
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_expiry_label: Option<String>,
}

impl RawOptionTotals {
    /// 네 가지 집계값만으로 생성합니다.
    pub fn new(call_oi: f64, put_oi: f64, call_volume: f64, put_volume: f64) -> Self {
        Self {
            total_call_open_interest: call_oi,
            total_put_open_interest: put_oi,
            total_call_volume: call_volume,
            total_put_volume: put_volume,
            ..Default::default()
        }
    }

    /// 현재가를 설정합니다.
    pub fn with_spot_price(mut self, spot_price: f64) -> Self {
        self.spot_price = Some(spot_price);
        self
    }

    /// 만기 라벨을 설정합니다.
    pub fn with_expiries(mut self, current: impl Into<String>, next: impl Into<String>) -> Self {
        self.current_expiry_label = Some(current.into());
        self.next_expiry_label = Some(next.into());
        self
    }
}

/// 시장 심리 지표.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// 강세 (풋 우위)
    Bullish,
    /// 약세 (콜 우위)
    Bearish,
    /// 중립
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Bullish => write!(f, "bullish"),
            Sentiment::Bearish => write!(f, "bearish"),
            Sentiment::Neutral => write!(f, "neutral"),
        }
    }
}

/// 직전 샘플 대비 PCR 추세.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// 상승
    Up,
    /// 하락
    Down,
    /// 변화 없음 (중립 구간 이내)
    Neutral,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
            Trend::Neutral => write!(f, "neutral"),
        }
    }
}

/// 한 시점의 PCR 샘플.
///
/// 생성 후 변경되지 않으며, 차이값(`*_diff`)은 같은 심볼의
/// 직전 샘플 대비로 계산됩니다 (직전 샘플이 없으면 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSample {
    /// 샘플 생성 시각
    pub timestamp: DateTime<Utc>,
    /// 콜 미결제약정
    #[serde(rename = "callOI")]
    pub call_oi: i64,
    /// 풋 미결제약정
    #[serde(rename = "putOI")]
    pub put_oi: i64,
    /// 콜 거래량
    pub call_volume: i64,
    /// 풋 거래량
    pub put_volume: i64,
    /// 콜 + 풋 미결제약정
    #[serde(rename = "callPutTotalOI")]
    pub call_put_total_oi: i64,
    /// Put-Call Ratio (소수점 2자리)
    pub pcr: Decimal,
    /// 미결제약정 합계 변화
    pub oi_diff: i64,
    /// 콜+풋 합계 미결제약정 변화
    pub total_oi_diff: i64,
    /// 거래량 합계 변화
    pub volume_diff: i64,
    /// 시장 심리
    pub sentiment: Sentiment,
    /// PCR 절대 변화량
    pub pcr_change: Decimal,
    /// PCR 변화율 (%)
    pub pcr_change_percent: Decimal,
    /// 추세 방향
    pub trend: Trend,
}

impl MetricSample {
    /// 총 거래량 (콜 + 풋).
    pub fn total_volume(&self) -> i64 {
        self.call_volume.saturating_add(self.put_volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_totals_builder() {
        let raw = RawOptionTotals::new(100.0, 120.0, 10.0, 12.0)
            .with_spot_price(25_000.5)
            .with_expiries("30-OCT-2025", "27-NOV-2025");

        assert_eq!(raw.total_put_open_interest, 120.0);
        assert_eq!(raw.spot_price, Some(25_000.5));
        assert_eq!(raw.next_expiry_label.as_deref(), Some("27-NOV-2025"));
    }

    #[test]
    fn test_enum_display() {
        assert_eq!(Sentiment::Bullish.to_string(), "bullish");
        assert_eq!(Trend::Down.to_string(), "down");
    }

    #[test]
    fn test_sentiment_serde_lowercase() {
        let json = serde_json::to_string(&Sentiment::Bearish).unwrap();
        assert_eq!(json, "\"bearish\"");
        let trend: Trend = serde_json::from_str("\"up\"").unwrap();
        assert_eq!(trend, Trend::Up);
    }
}
