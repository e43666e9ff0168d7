//! 지수별 PCR 상태.
//!
//! 히스토리는 오래된 순으로 정렬되며 최대 [`HISTORY_CAPACITY`]개까지만 유지합니다.
//! 용량을 넘으면 가장 오래된 샘플부터 제거합니다 (FIFO).
//! 최신 샘플은 별도 필드가 아니라 항상 히스토리의 마지막 항목입니다.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::{MetricSample, RawOptionTotals};
use crate::IndexSymbol;

/// 지수별 히스토리 최대 길이.
pub const HISTORY_CAPACITY: usize = 50;

/// 한 지수의 메모리 상태.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexState {
    /// 지수 심볼
    pub symbol: IndexSymbol,
    /// 표시용 이름
    pub display_name: String,
    /// 기초 지수 현재가
    #[serde(default)]
    pub spot_price: Option<f64>,
    /// 근월물 만기
    pub current_expiry: String,
    /// 차월물 만기
    pub next_expiry: String,
    /// 샘플 히스토리 (오래된 순)
    #[serde(default)]
    history: VecDeque<MetricSample>,
}

impl IndexState {
    /// 빈 히스토리로 새 상태를 생성합니다.
    pub fn new(
        symbol: IndexSymbol,
        current_expiry: impl Into<String>,
        next_expiry: impl Into<String>,
    ) -> Self {
        Self {
            symbol,
            display_name: symbol.display_name().to_string(),
            spot_price: None,
            current_expiry: current_expiry.into(),
            next_expiry: next_expiry.into(),
            history: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// 최신 샘플 (히스토리의 마지막 항목).
    pub fn latest(&self) -> Option<&MetricSample> {
        self.history.back()
    }

    /// 히스토리를 오래된 순으로 반환합니다.
    pub fn history(&self) -> impl DoubleEndedIterator<Item = &MetricSample> + ExactSizeIterator {
        self.history.iter()
    }

    /// 히스토리 길이.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// 샘플을 추가합니다. 용량을 넘으면 가장 오래된 샘플을 제거합니다.
    pub fn push_sample(&mut self, sample: MetricSample) {
        while self.history.len() >= HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(sample);
    }

    /// 조회 결과를 반영합니다.
    ///
    /// 현재가는 값이 있을 때만, 만기 라벨은 비어 있지 않을 때만 갱신하고
    /// 샘플은 히스토리에 추가합니다.
    pub fn apply(&mut self, raw: &RawOptionTotals, sample: MetricSample) {
        if let Some(spot) = raw.spot_price {
            self.spot_price = Some(spot);
        }
        if let Some(label) = non_empty(raw.current_expiry_label.as_deref()) {
            self.current_expiry = label.to_string();
        }
        if let Some(label) = non_empty(raw.next_expiry_label.as_deref()) {
            self.next_expiry = label.to_string();
        }
        self.push_sample(sample);
    }

    /// 역직렬화된 상태의 히스토리 길이를 용량 이내로 맞춥니다.
    pub fn enforce_capacity(&mut self) {
        while self.history.len() > HISTORY_CAPACITY {
            self.history.pop_front();
        }
    }
}

fn non_empty(label: Option<&str>) -> Option<&str> {
    label.map(str::trim).filter(|l| !l.is_empty())
}
