//! 새로고침 주기 통계.

use pcr_core::IndexSymbol;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 한 번의 새로고침 주기 통계
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleStats {
    /// 프로세스 시작 후 주기 번호
    pub cycle: u64,
    /// 수동 강제 새로고침 여부
    pub forced: bool,
    /// 조회 대상 심볼 수
    pub total: usize,
    /// 성공 횟수
    pub success: usize,
    /// 실패 횟수
    pub failed: usize,
    /// 실패한 심볼
    pub failed_symbols: Vec<IndexSymbol>,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl CycleStats {
    pub fn new(cycle: u64, forced: bool) -> Self {
        Self {
            cycle,
            forced,
            ..Default::default()
        }
    }

    pub fn record_success(&mut self) {
        self.total += 1;
        self.success += 1;
    }

    pub fn record_failure(&mut self, symbol: IndexSymbol) {
        self.total += 1;
        self.failed += 1;
        self.failed_symbols.push(symbol);
    }

    /// 일부만 성공했는지 여부
    pub fn is_partial_failure(&self) -> bool {
        self.success > 0 && self.failed > 0
    }

    /// 전부 실패했는지 여부
    pub fn is_total_failure(&self) -> bool {
        self.total > 0 && self.success == 0
    }

    /// 성공률 계산 (%)
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.success as f64 / self.total as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self) {
        let failed: Vec<&str> = self.failed_symbols.iter().map(|s| s.as_str()).collect();
        tracing::info!(
            cycle = self.cycle,
            forced = self.forced,
            total = self.total,
            success = self.success,
            failed = self.failed,
            failed_symbols = %failed.join(","),
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed_ms = self.elapsed.as_millis() as u64,
            "새로고침 주기 완료"
        );
    }
}
