use serde::{Deserialize, Serialize};

use crate::query::ResultKind;
use crate::{MarketDate, Ticker, ValidationError};

/// Typed market-data value produced by a resolution.
///
/// Modeled as a tagged union keyed by [`ResultKind`]; each variant is a flat
/// value record carrying the date it pertains to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarketData {
    Scalar {
        date: MarketDate,
        value: f64,
    },
    CallPrice {
        date: MarketDate,
        surface: CallPriceSurface,
    },
}

impl MarketData {
    pub fn scalar(date: MarketDate, value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteValue { field: "value" });
        }
        Ok(Self::Scalar { date, value })
    }

    pub fn call_price(date: MarketDate, surface: CallPriceSurface) -> Self {
        Self::CallPrice { date, surface }
    }

    /// Date this value pertains to.
    pub const fn timestamp(&self) -> MarketDate {
        match self {
            Self::Scalar { date, .. } | Self::CallPrice { date, .. } => *date,
        }
    }

    pub const fn kind(&self) -> ResultKind {
        match self {
            Self::Scalar { .. } => ResultKind::Scalar,
            Self::CallPrice { .. } => ResultKind::CallPrice,
        }
    }
}

/// Recorded option-pricing surface for one underlying on one date.
///
/// `prices` is indexed `[maturity][strike]`; maturities are year fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallPriceSurface {
    pub underlying_price: f64,
    pub strikes: Vec<f64>,
    pub maturities: Vec<f64>,
    pub prices: Vec<Vec<f64>>,
}

impl CallPriceSurface {
    pub fn new(
        underlying_price: f64,
        strikes: Vec<f64>,
        maturities: Vec<f64>,
        prices: Vec<Vec<f64>>,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("underlying_price", underlying_price)?;

        if strikes.is_empty() || maturities.is_empty() {
            return Err(ValidationError::EmptySurface);
        }

        for (field, values) in [("strike", &strikes), ("maturity", &maturities)] {
            for value in values {
                validate_non_negative(field, *value)?;
            }
        }

        if prices.len() != maturities.len() {
            return Err(ValidationError::SurfaceRowMismatch);
        }

        for (row, row_prices) in prices.iter().enumerate() {
            if row_prices.len() != strikes.len() {
                return Err(ValidationError::SurfaceColumnMismatch { row });
            }
            for value in row_prices {
                validate_non_negative("price", *value)?;
            }
        }

        Ok(Self {
            underlying_price,
            strikes,
            maturities,
            prices,
        })
    }
}

/// A discovered ticker's identity, produced by symbol search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolDefinition {
    pub name: Ticker,
    pub description: String,
}

impl SymbolDefinition {
    pub fn new(name: Ticker, description: impl Into<String>) -> Self {
        Self {
            name,
            description: description.into(),
        }
    }
}

/// Dated points for one ticker/field, most recent first.
///
/// Construction sorts the points into strictly descending date order and
/// rejects duplicate dates, so `dates()[i]` always equals
/// `points()[i].timestamp()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MarketData>", into = "Vec<MarketData>")]
pub struct TimeSeries {
    points: Vec<MarketData>,
}

impl TimeSeries {
    pub fn new(mut points: Vec<MarketData>) -> Result<Self, ValidationError> {
        points.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));

        for pair in points.windows(2) {
            if pair[0].timestamp() == pair[1].timestamp() {
                return Err(ValidationError::DuplicateSeriesDate {
                    value: pair[0].timestamp().to_string(),
                });
            }
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[MarketData] {
        &self.points
    }

    pub fn dates(&self) -> Vec<MarketDate> {
        self.points.iter().map(MarketData::timestamp).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<MarketData> {
        self.points
    }
}

impl TryFrom<Vec<MarketData>> for TimeSeries {
    type Error = ValidationError;

    fn try_from(value: Vec<MarketData>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TimeSeries> for Vec<MarketData> {
    fn from(value: TimeSeries) -> Self {
        value.points
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
