//! 추적 대상 지수 심볼 정의.
//!
//! 옵션 체인 PCR을 추적하는 NSE 지수 목록입니다:
//! - `NIFTY` - Nifty 50
//! - `BANKNIFTY` - Bank Nifty
//! - `FINNIFTY` - Fin Nifty
//! - `MIDCPNIFTY` - Midcap Nifty

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 옵션 체인을 추적하는 지수 심볼.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndexSymbol {
    /// Nifty 50
    Nifty,
    /// Bank Nifty
    BankNifty,
    /// Fin Nifty
    FinNifty,
    /// Midcap Nifty
    MidcpNifty,
}

impl IndexSymbol {
    /// 지원하는 모든 지수.
    pub const ALL: [IndexSymbol; 4] = [
        IndexSymbol::Nifty,
        IndexSymbol::BankNifty,
        IndexSymbol::FinNifty,
        IndexSymbol::MidcpNifty,
    ];

    /// 기본 추적 대상 지수.
    pub const DEFAULT_TRACKED: [IndexSymbol; 2] = [IndexSymbol::Nifty, IndexSymbol::BankNifty];

    /// 거래소 심볼 문자열 (예: "BANKNIFTY").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nifty => "NIFTY",
            Self::BankNifty => "BANKNIFTY",
            Self::FinNifty => "FINNIFTY",
            Self::MidcpNifty => "MIDCPNIFTY",
        }
    }

    /// 화면 표시용 이름.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Nifty => "Nifty 50",
            Self::BankNifty => "Bank Nifty",
            Self::FinNifty => "Fin Nifty",
            Self::MidcpNifty => "Midcap Nifty",
        }
    }

    /// 쉼표로 구분된 심볼 목록을 파싱합니다 (예: "NIFTY,BANKNIFTY").
    pub fn parse_list(s: &str) -> Result<Vec<IndexSymbol>, String> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for IndexSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexSymbol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NIFTY" => Ok(Self::Nifty),
            "BANKNIFTY" => Ok(Self::BankNifty),
            "FINNIFTY" => Ok(Self::FinNifty),
            "MIDCPNIFTY" => Ok(Self::MidcpNifty),
            _ => Err(format!("Unknown index symbol: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_from_str() {
        assert_eq!("nifty".parse::<IndexSymbol>().unwrap(), IndexSymbol::Nifty);
        assert_eq!(
            " BANKNIFTY ".parse::<IndexSymbol>().unwrap(),
            IndexSymbol::BankNifty
        );
        assert!("SENSEX".parse::<IndexSymbol>().is_err());
    }

    #[test]
    fn test_symbol_display_roundtrip() {
        for symbol in IndexSymbol::ALL {
            assert_eq!(symbol.to_string().parse::<IndexSymbol>().unwrap(), symbol);
        }
    }

    #[test]
    fn test_parse_list() {
        let list = IndexSymbol::parse_list("NIFTY, banknifty,").unwrap();
        assert_eq!(list, vec![IndexSymbol::Nifty, IndexSymbol::BankNifty]);
        assert!(IndexSymbol::parse_list("NIFTY,FOO").is_err());
    }

    #[test]
    fn test_serde_uses_exchange_code() {
        let json = serde_json::to_string(&IndexSymbol::MidcpNifty).unwrap();
        assert_eq!(json, "\"MIDCPNIFTY\"");
    }
}
