//! PCR 지표 엔진.
//!
//! 원시 옵션 집계값에서 [`MetricSample`]을 파생합니다.
//! 모든 함수는 부수 효과가 없는 순수 계산입니다.
//!
//! # 계산 규칙
//!
//! - `pcr = round(put_oi / call_oi, 2)`, `call_oi == 0`이면 0
//! - 심리: `pcr >= 1.2`이면 강세, `pcr <= 0.8`이면 약세, 그 외 중립
//! - 추세: 변화율 절댓값이 0.5% 미만이면 중립

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{round_to_count, DecimalExt, Percentage, Ratio};
use crate::{MetricSample, RawOptionTotals, Sentiment, Trend};

/// 심리/추세 판정 임계값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentThresholds {
    /// 강세 판정 PCR 하한 (이상)
    pub bullish: Ratio,
    /// 약세 판정 PCR 상한 (이하)
    pub bearish: Ratio,
    /// 추세 중립 구간 (변화율 %, 미만)
    pub trend_neutral_band: Percentage,
}

impl Default for SentimentThresholds {
    fn default() -> Self {
        Self {
            bullish: dec!(1.2),
            bearish: dec!(0.8),
            trend_neutral_band: dec!(0.5),
        }
    }
}

/// 직전 샘플 대비 PCR 변화.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendChange {
    pub change: Decimal,
    pub change_percent: Percentage,
    pub trend: Trend,
}

impl TrendChange {
    /// 직전 샘플이 없을 때의 값.
    pub const FLAT: TrendChange = TrendChange {
        change: Decimal::ZERO,
        change_percent: Decimal::ZERO,
        trend: Trend::Neutral,
    };
}

/// PCR 샘플 파생 엔진.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricEngine {
    thresholds: SentimentThresholds,
}

impl MetricEngine {
    /// 기본 임계값으로 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 임계값을 지정하여 생성합니다.
    pub fn with_thresholds(thresholds: SentimentThresholds) -> Self {
        Self { thresholds }
    }

    /// 현재 임계값.
    pub fn thresholds(&self) -> &SentimentThresholds {
        &self.thresholds
    }

    /// 원시 집계값과 직전 샘플로 새 샘플을 파생합니다.
    pub fn derive(
        &self,
        raw: &RawOptionTotals,
        previous: Option<&MetricSample>,
        timestamp: DateTime<Utc>,
    ) -> MetricSample {
        let call_oi = round_to_count(raw.total_call_open_interest);
        let put_oi = round_to_count(raw.total_put_open_interest);
        let call_volume = round_to_count(raw.total_call_volume);
        let put_volume = round_to_count(raw.total_put_volume);
        let call_put_total_oi = call_oi.saturating_add(put_oi);

        let pcr = calculate_pcr(call_oi, put_oi);

        let (oi_diff, total_oi_diff, volume_diff) = match previous {
            Some(prev) => (
                call_put_total_oi.saturating_sub(prev.call_oi.saturating_add(prev.put_oi)),
                call_put_total_oi.saturating_sub(prev.call_put_total_oi),
                call_volume
                    .saturating_add(put_volume)
                    .saturating_sub(prev.total_volume()),
            ),
            None => (0, 0, 0),
        };

        let sentiment = self.classify_sentiment(pcr, oi_diff);
        let trend = match previous {
            Some(prev) => self.calculate_trend(pcr, prev.pcr),
            None => TrendChange::FLAT,
        };

        MetricSample {
            timestamp,
            call_oi,
            put_oi,
            call_volume,
            put_volume,
            call_put_total_oi,
            pcr,
            oi_diff,
            total_oi_diff,
            volume_diff,
            sentiment,
            pcr_change: trend.change,
            pcr_change_percent: trend.change_percent,
            trend: trend.trend,
        }
    }

    /// PCR과 미결제약정 변화로 시장 심리를 판정합니다.
    ///
    /// 미결제약정 방향 조건이 붙은 분기와 붙지 않은 분기는 결과가 같습니다.
    /// 방향은 현재 판정에 영향을 주지 않습니다.
    pub fn classify_sentiment(&self, pcr: Ratio, oi_diff: i64) -> Sentiment {
        let SentimentThresholds { bullish, bearish, .. } = self.thresholds;

        if pcr >= bullish && oi_diff > 0 {
            Sentiment::Bullish
        } else if pcr <= bearish && oi_diff < 0 {
            Sentiment::Bearish
        } else if pcr >= bullish {
            Sentiment::Bullish
        } else if pcr <= bearish {
            Sentiment::Bearish
        } else {
            Sentiment::Neutral
        }
    }

    /// 직전 PCR 대비 변화량, 변화율, 추세를 계산합니다.
    pub fn calculate_trend(&self, current: Ratio, previous: Ratio) -> TrendChange {
        let change = (current - previous).round_display();
        let change_percent = if previous.is_zero() {
            Decimal::ZERO
        } else {
            change
                .checked_div(previous)
                .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
                .map(|p| p.round_display())
                .unwrap_or(Decimal::ZERO)
        };

        let trend = if change_percent.abs() < self.thresholds.trend_neutral_band {
            Trend::Neutral
        } else if change > Decimal::ZERO {
            Trend::Up
        } else {
            Trend::Down
        };

        TrendChange {
            change,
            change_percent,
            trend,
        }
    }
}

/// 풋/콜 미결제약정 비율 (소수점 2자리). 콜이 0이면 0.
pub fn calculate_pcr(call_oi: i64, put_oi: i64) -> Ratio {
    if call_oi == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(put_oi)
        .checked_div(Decimal::from(call_oi))
        .map(|r| r.round_display())
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 20, 4, 0, 0).unwrap()
    }

    fn previous_with_pcr(pcr: Decimal) -> MetricSample {
        let engine = MetricEngine::new();
        let mut sample = engine.derive(&RawOptionTotals::new(1000.0, 1000.0, 50.0, 50.0), None, ts());
        sample.pcr = pcr;
        sample
    }

    #[test]
    fn test_pcr_basic_and_rounding() {
        assert_eq!(calculate_pcr(1000, 1250), dec!(1.25));
        assert_eq!(calculate_pcr(3, 2), dec!(0.67));
        assert_eq!(calculate_pcr(8, 9), dec!(1.13));
    }

    #[test]
    fn test_pcr_zero_call_oi() {
        assert_eq!(calculate_pcr(0, 5000), Decimal::ZERO);
    }

    #[test]
    fn test_first_sample_has_flat_trend_and_zero_diffs() {
        let sample = MetricEngine::new().derive(
            &RawOptionTotals::new(1000.4, 900.6, 10.0, 20.0),
            None,
            ts(),
        );
        assert_eq!(sample.call_oi, 1000);
        assert_eq!(sample.put_oi, 901);
        assert_eq!(sample.call_put_total_oi, 1901);
        assert_eq!(sample.oi_diff, 0);
        assert_eq!(sample.total_oi_diff, 0);
        assert_eq!(sample.volume_diff, 0);
        assert_eq!(sample.pcr_change, Decimal::ZERO);
        assert_eq!(sample.trend, Trend::Neutral);
    }

    #[test]
    fn test_nifty_pcr_rise_is_bullish_uptrend() {
        let engine = MetricEngine::new();
        let previous = previous_with_pcr(dec!(1.00));
        let raw = RawOptionTotals::new(100_000.0, 125_000.0, 4_000.0, 5_000.0);

        let sample = engine.derive(&raw, Some(&previous), ts());

        assert_eq!(sample.pcr, dec!(1.25));
        assert_eq!(sample.pcr_change, dec!(0.25));
        assert_eq!(sample.pcr_change_percent, dec!(25.00));
        assert_eq!(sample.trend, Trend::Up);
        assert_eq!(sample.sentiment, Sentiment::Bullish);
    }

    #[test]
    fn test_diffs_against_previous() {
        let engine = MetricEngine::new();
        let first = engine.derive(&RawOptionTotals::new(100.0, 80.0, 10.0, 5.0), None, ts());
        let second = engine.derive(&RawOptionTotals::new(90.0, 110.0, 30.0, 5.0), Some(&first), ts());

        assert_eq!(second.oi_diff, 20);
        assert_eq!(second.total_oi_diff, 20);
        assert_eq!(second.volume_diff, 20);
    }

    #[test]
    fn test_diffs_saturate_on_extreme_totals() {
        let engine = MetricEngine::new();
        let first = engine.derive(&RawOptionTotals::new(1e30, 1e30, 1e30, 1e30), None, ts());
        assert_eq!(first.call_put_total_oi, i64::MAX);

        let second = engine.derive(
            &RawOptionTotals::new(-1e30, -1e30, -1e30, -1e30),
            Some(&first),
            ts(),
        );
        assert_eq!(second.call_put_total_oi, i64::MIN);
        assert_eq!(second.oi_diff, i64::MIN);
        assert_eq!(second.total_oi_diff, i64::MIN);
        assert_eq!(second.volume_diff, i64::MIN);

        let third = engine.derive(&RawOptionTotals::new(1e30, 1e30, 0.0, 0.0), Some(&second), ts());
        assert_eq!(third.oi_diff, i64::MAX);
        assert_eq!(third.volume_diff, i64::MAX);
    }

    #[test]
    fn test_sentiment_ignores_oi_direction() {
        let engine = MetricEngine::new();
        assert_eq!(engine.classify_sentiment(dec!(1.2), -500), Sentiment::Bullish);
        assert_eq!(engine.classify_sentiment(dec!(1.2), 500), Sentiment::Bullish);
        assert_eq!(engine.classify_sentiment(dec!(0.8), 500), Sentiment::Bearish);
        assert_eq!(engine.classify_sentiment(dec!(0.8), -500), Sentiment::Bearish);
        assert_eq!(engine.classify_sentiment(dec!(1.0), 0), Sentiment::Neutral);
        assert_eq!(engine.classify_sentiment(dec!(1.19), 10), Sentiment::Neutral);
        assert_eq!(engine.classify_sentiment(dec!(0.81), -10), Sentiment::Neutral);
    }

    #[test]
    fn test_trend_neutral_band() {
        let engine = MetricEngine::new();
        // 0.004 / 1.00 → 변화량 0.00
        let t = engine.calculate_trend(dec!(1.004), dec!(1.00));
        assert_eq!(t.trend, Trend::Neutral);

        // 0.01 / 2.50 = 0.4% → 중립
        let t = engine.calculate_trend(dec!(2.51), dec!(2.50));
        assert_eq!(t.change_percent, dec!(0.40));
        assert_eq!(t.trend, Trend::Neutral);

        // -0.01 / 1.00 = -1% → 하락
        let t = engine.calculate_trend(dec!(0.99), dec!(1.00));
        assert_eq!(t.change_percent, dec!(-1.00));
        assert_eq!(t.trend, Trend::Down);
    }

    #[test]
    fn test_trend_previous_zero_pcr() {
        let t = MetricEngine::new().calculate_trend(dec!(0.90), Decimal::ZERO);
        assert_eq!(t.change, dec!(0.90));
        assert_eq!(t.change_percent, Decimal::ZERO);
        assert_eq!(t.trend, Trend::Neutral);
    }

    #[test]
    fn test_custom_thresholds() {
        let engine = MetricEngine::with_thresholds(SentimentThresholds {
            bullish: dec!(1.5),
            bearish: dec!(0.5),
            trend_neutral_band: dec!(5),
        });
        assert_eq!(engine.classify_sentiment(dec!(1.3), 1), Sentiment::Neutral);
        assert_eq!(engine.calculate_trend(dec!(1.03), dec!(1.00)).trend, Trend::Neutral);
    }

    proptest! {
        #[test]
        fn prop_pcr_zero_when_no_calls(put in 0i64..10_000_000) {
            prop_assert_eq!(calculate_pcr(0, put), Decimal::ZERO);
        }

        #[test]
        fn prop_pcr_has_two_decimal_places(call in 1i64..10_000_000, put in 0i64..10_000_000) {
            let pcr = calculate_pcr(call, put);
            prop_assert!(pcr.scale() <= 2);
            prop_assert!(pcr >= Decimal::ZERO);
        }

        #[test]
        fn prop_zero_previous_pcr_gives_zero_percent(cur in 0u32..500) {
            let t = MetricEngine::new().calculate_trend(Decimal::new(i64::from(cur), 2), Decimal::ZERO);
            prop_assert_eq!(t.change_percent, Decimal::ZERO);
        }

        #[test]
        fn prop_small_change_is_neutral(prev in 1u32..500, cur in 0u32..500) {
            let t = MetricEngine::new().calculate_trend(
                Decimal::new(i64::from(cur), 2),
                Decimal::new(i64::from(prev), 2),
            );
            if t.change_percent.abs() < dec!(0.5) {
                prop_assert_eq!(t.trend, Trend::Neutral);
            } else {
                prop_assert_ne!(t.trend, Trend::Neutral);
            }
        }
    }
}
