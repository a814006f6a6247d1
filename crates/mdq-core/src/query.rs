use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{MarketDate, Ticker, ValidationError};

/// Type tag identifying which market-data shape a query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Scalar,
    CallPrice,
}

impl ResultKind {
    pub const ALL: [Self; 2] = [Self::Scalar, Self::CallPrice];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::CallPrice => "call_price",
        }
    }
}

impl Display for ResultKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "scalar" => Ok(Self::Scalar),
            "call_price" => Ok(Self::CallPrice),
            other => Err(ValidationError::UnknownResultKind {
                value: other.to_owned(),
            }),
        }
    }
}

/// Named attribute of a daily market-data record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl Field {
    pub const ALL: [Self; 5] = [Self::Open, Self::High, Self::Low, Self::Close, Self::Volume];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            "close" => Ok(Self::Close),
            "volume" => Ok(Self::Volume),
            other => Err(ValidationError::InvalidField {
                value: other.to_owned(),
            }),
        }
    }
}

/// Immutable-once-built request descriptor for one resolution.
///
/// `date` is the as-of date for single-point lookups and the range start for
/// time series. A query is built once per call and not reused across
/// providers with different symbol spaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDataQuery {
    pub ticker: Ticker,
    pub date: MarketDate,
    pub field: Field,
    pub result_kind: ResultKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
}

impl MarketDataQuery {
    pub fn new(ticker: Ticker, date: MarketDate, field: Field, result_kind: ResultKind) -> Self {
        Self {
            ticker,
            date,
            field,
            result_kind,
            market: None,
        }
    }

    /// Disambiguate a ticker that trades on more than one market.
    pub fn with_market(mut self, market: impl Into<String>) -> Result<Self, ValidationError> {
        let market = market.into();
        if market.trim().is_empty() {
            return Err(ValidationError::EmptyMarket);
        }
        self.market = Some(market);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_result_kind_case_insensitively() {
        assert_eq!(
            "Scalar".parse::<ResultKind>().expect("must parse"),
            ResultKind::Scalar
        );
        assert_eq!(
            "call_price".parse::<ResultKind>().expect("must parse"),
            ResultKind::CallPrice
        );
    }

    #[test]
    fn rejects_unknown_result_kind() {
        let err = "option_matrix".parse::<ResultKind>().expect_err("must fail");
        assert!(matches!(err, ValidationError::UnknownResultKind { .. }));
    }

    #[test]
    fn every_kind_and_field_round_trips_through_strings() {
        for kind in ResultKind::ALL {
            assert_eq!(kind.as_str().parse::<ResultKind>().expect("must parse"), kind);
        }
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>().expect("must parse"), field);
        }
    }

    #[test]
    fn rejects_unknown_field() {
        let err = "vwap".parse::<Field>().expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidField { .. }));
    }

    #[test]
    fn rejects_blank_market_label() {
        let query = MarketDataQuery::new(
            Ticker::parse("BBVA").expect("ticker"),
            MarketDate::parse("2013-07-01").expect("date"),
            Field::Close,
            ResultKind::CallPrice,
        );

        let err = query.with_market("  ").expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyMarket));
    }
}
