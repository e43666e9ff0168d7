//! 옵션 체인 원시 집계값 조회.

mod http;

pub use http::{parse_option_chain, HttpOptionChainSource};

use async_trait::async_trait;
use pcr_core::{IndexSymbol, RawOptionTotals};

use crate::error::SourceError;

/// 심볼별 원시 집계값 조회 인터페이스.
///
/// 서로 다른 심볼에 대해 동시에 호출될 수 있습니다.
#[async_trait]
pub trait OptionChainSource: Send + Sync {
    async fn fetch_raw_totals(&self, symbol: IndexSymbol) -> Result<RawOptionTotals, SourceError>;
}
