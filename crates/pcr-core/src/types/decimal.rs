//! 표시 경계에서 사용하는 Decimal 반올림 유틸리티.
//!
//! PCR, 변화량, 변화율은 모두 소수점 2자리로 반올림되어 저장됩니다.
//! 반올림은 항상 0에서 멀어지는 방향(half away from zero)으로 수행합니다.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// 비율 타입 (PCR 등).
pub type Ratio = Decimal;

/// 퍼센트 타입 (25.00 = 25%).
pub type Percentage = Decimal;

/// 표시용 소수점 자릿수.
pub const DISPLAY_DP: u32 = 2;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 지정된 소수점 자릿수로 반올림합니다 (half away from zero).
    fn round_dp_away(&self, dp: u32) -> Decimal;

    /// 표시용 자릿수(2자리)로 반올림합니다.
    fn round_display(&self) -> Decimal {
        self.round_dp_away(DISPLAY_DP)
    }

    /// f64로 변환합니다 (변환 불가 시 0.0).
    fn to_f64_lossy(&self) -> f64;
}

impl DecimalExt for Decimal {
    fn round_dp_away(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
    }

    fn to_f64_lossy(&self) -> f64 {
        self.to_f64().unwrap_or(0.0)
    }
}

/// 원시 집계값을 가장 가까운 정수로 반올림합니다.
///
/// 업스트림 피드가 실수나 비정상 값(NaN, 무한대)을 보내도 0으로 취급합니다.
pub fn round_to_count(value: f64) -> i64 {
    if value.is_finite() {
        value.round() as i64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(dec!(1.005).round_display(), dec!(1.01));
        assert_eq!(dec!(-1.005).round_display(), dec!(-1.01));
        assert_eq!(dec!(1.004).round_display(), dec!(1.00));
        assert_eq!(dec!(0.125).round_dp_away(2), dec!(0.13));
    }

    #[test]
    fn test_round_to_count() {
        assert_eq!(round_to_count(10.4), 10);
        assert_eq!(round_to_count(10.5), 11);
        assert_eq!(round_to_count(-2.5), -3);
        assert_eq!(round_to_count(f64::NAN), 0);
        assert_eq!(round_to_count(f64::INFINITY), 0);
    }

    #[test]
    fn test_to_f64_lossy() {
        assert_eq!(dec!(1.25).to_f64_lossy(), 1.25);
    }
}
