use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::query::ResultKind;
use crate::{MarketData, MarketDataQuery, MarketDate, SymbolDefinition, Ticker, TimeSeries, ValidationError};

/// Canonical upstream source identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Meff,
    Yahoo,
}

impl ProviderId {
    pub const ALL: [Self; 2] = [Self::Meff, Self::Yahoo];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Meff => "meff",
            Self::Yahoo => "yahoo",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "meff" => Ok(Self::Meff),
            "yahoo" => Ok(Self::Yahoo),
            other => Err(ValidationError::InvalidProvider {
                value: other.to_owned(),
            }),
        }
    }
}

/// Supported result-shape/operation matrix for a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet {
    pub scalar: bool,
    pub call_price: bool,
    pub time_series: bool,
    pub search: bool,
}

impl CapabilitySet {
    pub const fn new(scalar: bool, call_price: bool, time_series: bool, search: bool) -> Self {
        Self {
            scalar,
            call_price,
            time_series,
            search,
        }
    }

    pub const fn full() -> Self {
        Self::new(true, true, true, true)
    }

    pub const fn supports_kind(self, kind: ResultKind) -> bool {
        match kind {
            ResultKind::Scalar => self.scalar,
            ResultKind::CallPrice => self.call_price,
        }
    }

    pub fn supported_operations(self) -> Vec<&'static str> {
        let mut values = Vec::with_capacity(4);
        if self.scalar {
            values.push("scalar");
        }
        if self.call_price {
            values.push("call_price");
        }
        if self.time_series {
            values.push("time_series");
        }
        if self.search {
            values.push("search");
        }
        values
    }
}

/// Failure classification for resolution operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveErrorKind {
    Connectivity,
    UnknownSymbol,
    NoData,
    UnsupportedResultType,
    InvalidRequest,
    Internal,
}

/// Structured resolution error.
///
/// Plays the role of a "status with errors" outcome: every expected failure
/// mode (connectivity loss, unknown ticker, missing data) is reported as a
/// value of this type, never as a panic, so callers must check success
/// before they can touch a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveError {
    kind: ResolveErrorKind,
    message: String,
    retryable: bool,
}

impl ResolveError {
    pub fn connectivity(message: impl Into<String>) -> Self {
        Self {
            kind: ResolveErrorKind::Connectivity,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn unknown_symbol(ticker: &Ticker, provider: ProviderId) -> Self {
        Self {
            kind: ResolveErrorKind::UnknownSymbol,
            message: format!("ticker '{ticker}' is not known to provider '{provider}'"),
            retryable: false,
        }
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self {
            kind: ResolveErrorKind::NoData,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn unsupported_result_type(message: impl Into<String>) -> Self {
        Self {
            kind: ResolveErrorKind::UnsupportedResultType,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: ResolveErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: ResolveErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> ResolveErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ResolveErrorKind::Connectivity => "resolve.connectivity",
            ResolveErrorKind::UnknownSymbol => "resolve.unknown_symbol",
            ResolveErrorKind::NoData => "resolve.no_data",
            ResolveErrorKind::UnsupportedResultType => "resolve.unsupported_result_type",
            ResolveErrorKind::InvalidRequest => "resolve.invalid_request",
            ResolveErrorKind::Internal => "resolve.internal",
        }
    }
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ResolveError {}

impl From<ValidationError> for ResolveError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::UnknownResultKind { .. } => {
                Self::unsupported_result_type(error.to_string())
            }
            other => Self::invalid_request(other.to_string()),
        }
    }
}

/// Provider adapter contract: one implementation per upstream source.
///
/// Every operation is a self-contained, stateless request/response cycle; a
/// shared instance may be called concurrently. Provider-specific failures
/// (unreachable upstream, malformed payloads, auth rejection) must be
/// translated into [`ResolveError`] instead of propagating as panics.
pub trait MarketDataProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    fn capabilities(&self) -> CapabilitySet;

    /// Lightweight round trip confirming the upstream is reachable.
    fn test_connectivity(&self) -> Result<(), ResolveError>;

    /// Resolve exactly one data point for `query.date`.
    fn market_data(&self, query: &MarketDataQuery) -> Result<MarketData, ResolveError>;

    /// Resolve all points with `query.date <= d <= end`, most recent first.
    /// Non-trading days are omitted; a partially covered range is a success.
    fn time_series(
        &self,
        query: &MarketDataQuery,
        end: MarketDate,
    ) -> Result<TimeSeries, ResolveError>;

    /// Every known symbol whose name starts with `prefix`, matched
    /// case-insensitively by uppercasing the prefix. No match is an empty
    /// vec, not an error.
    fn supported_tickers(&self, prefix: &str) -> Result<Vec<SymbolDefinition>, ResolveError>;
}
