//! NSE 옵션 체인 HTTP 소스.
//!
//! `GET {base_url}?symbol=NIFTY` 응답에서 다음 값만 추출합니다:
//! - `filtered.CE.totOI`, `filtered.PE.totOI`
//! - `filtered.CE.totVol`, `filtered.PE.totVol`
//! - `records.underlyingValue`, `records.expiryDates[0..2]`
//!
//! 프록시를 거친 응답은 `{ "optionChain": { ... } }` 형태로 감싸져 올 수 있습니다.

use async_trait::async_trait;
use pcr_core::{IndexSymbol, RawOptionTotals};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::OptionChainSource;
use crate::error::SourceError;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const REFERER_URL: &str = "https://www.nseindia.com/option-chain";

/// 에러 메시지에 포함할 응답 본문 최대 길이
const BODY_SNIPPET_LEN: usize = 120;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChainPayload {
    Wrapped {
        #[serde(rename = "optionChain")]
        option_chain: OptionChain,
    },
    Bare(OptionChain),
}

#[derive(Debug, Default, Deserialize)]
struct OptionChain {
    #[serde(default)]
    records: Option<Records>,
    #[serde(default)]
    filtered: Option<Filtered>,
}

#[derive(Debug, Default, Deserialize)]
struct Records {
    #[serde(rename = "underlyingValue", default)]
    underlying_value: Option<f64>,
    #[serde(rename = "expiryDates", default)]
    expiry_dates: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Filtered {
    #[serde(rename = "CE", default)]
    ce: Option<SideTotals>,
    #[serde(rename = "PE", default)]
    pe: Option<SideTotals>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
struct SideTotals {
    #[serde(rename = "totOI", default)]
    tot_oi: f64,
    #[serde(rename = "totVol", default)]
    tot_vol: f64,
}

/// 옵션 체인 JSON 본문을 원시 집계값으로 변환합니다.
///
/// 본문이 HTML이면 [`SourceError::Blocked`], `records`와 `filtered`가
/// 모두 없으면 [`SourceError::Parse`]를 반환합니다. 누락된 집계값은 0입니다.
pub fn parse_option_chain(body: &str) -> Result<RawOptionTotals, SourceError> {
    let trimmed = body.trim_start();
    if trimmed.starts_with('<') {
        return Err(SourceError::Blocked(snippet(trimmed)));
    }

    let payload: ChainPayload =
        serde_json::from_str(trimmed).map_err(|e| SourceError::Parse(e.to_string()))?;
    let chain = match payload {
        ChainPayload::Wrapped { option_chain } => option_chain,
        ChainPayload::Bare(chain) => chain,
    };

    if chain.records.is_none() && chain.filtered.is_none() {
        return Err(SourceError::Parse(
            "option chain has neither records nor filtered section".to_string(),
        ));
    }

    let filtered = chain.filtered.unwrap_or_default();
    let ce = filtered.ce.unwrap_or_default();
    let pe = filtered.pe.unwrap_or_default();
    let records = chain.records.unwrap_or_default();

    let mut raw = RawOptionTotals::new(ce.tot_oi, pe.tot_oi, ce.tot_vol, pe.tot_vol);
    raw.spot_price = records.underlying_value;
    let mut expiries = records.expiry_dates.into_iter();
    raw.current_expiry_label = expiries.next();
    raw.next_expiry_label = expiries.next();
    Ok(raw)
}

fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}

/// reqwest 기반 옵션 체인 소스.
#[derive(Debug, Clone)]
pub struct HttpOptionChainSource {
    client: Client,
    base_url: String,
}

impl HttpOptionChainSource {
    /// 새 소스를 생성합니다.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(REFERER, HeaderValue::from_static(REFERER_URL));

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| SourceError::Network(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl OptionChainSource for HttpOptionChainSource {
    async fn fetch_raw_totals(&self, symbol: IndexSymbol) -> Result<RawOptionTotals, SourceError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("symbol", symbol.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                message: snippet(&body),
            });
        }

        let raw = parse_option_chain(&body)?;
        debug!(
            symbol = %symbol,
            call_oi = raw.total_call_open_interest,
            put_oi = raw.total_put_open_interest,
            "옵션 체인 조회 완료"
        );
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAIN: &str = r#"{
        "records": {
            "underlyingValue": 25710.45,
            "expiryDates": ["28-Oct-2025", "04-Nov-2025", "11-Nov-2025"]
        },
        "filtered": {
            "CE": { "totOI": 1234567, "totVol": 89012 },
            "PE": { "totOI": 1543210.6, "totVol": 99000 }
        }
    }"#;

    #[test]
    fn test_parse_bare_chain() {
        let raw = parse_option_chain(CHAIN).unwrap();
        assert_eq!(raw.total_call_open_interest, 1_234_567.0);
        assert_eq!(raw.total_put_open_interest, 1_543_210.6);
        assert_eq!(raw.total_put_volume, 99_000.0);
        assert_eq!(raw.spot_price, Some(25_710.45));
        assert_eq!(raw.current_expiry_label.as_deref(), Some("28-Oct-2025"));
        assert_eq!(raw.next_expiry_label.as_deref(), Some("04-Nov-2025"));
    }

    #[test]
    fn test_parse_wrapped_chain() {
        let body = format!(r#"{{ "optionChain": {} }}"#, CHAIN);
        let raw = parse_option_chain(&body).unwrap();
        assert_eq!(raw.total_call_volume, 89_012.0);
    }

    #[test]
    fn test_missing_totals_default_to_zero() {
        let raw = parse_option_chain(r#"{ "records": { "expiryDates": [] }, "filtered": { "CE": {} } }"#)
            .unwrap();
        assert_eq!(raw.total_call_open_interest, 0.0);
        assert_eq!(raw.total_put_open_interest, 0.0);
        assert!(raw.current_expiry_label.is_none());
        assert!(raw.spot_price.is_none());
    }

    #[test]
    fn test_html_body_is_blocked() {
        let err = parse_option_chain("  <!DOCTYPE html><html>Access Denied</html>").unwrap_err();
        assert!(matches!(err, SourceError::Blocked(_)));
    }

    #[test]
    fn test_empty_object_is_parse_error() {
        assert!(matches!(parse_option_chain("{}"), Err(SourceError::Parse(_))));
        assert!(matches!(parse_option_chain("not json"), Err(SourceError::Parse(_))));
    }
}
