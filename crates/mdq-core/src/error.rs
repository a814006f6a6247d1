use thiserror::Error;

/// Validation errors exposed by `mdq-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker must start with an ASCII letter: '{ch}'")]
    TickerInvalidStart { ch: char },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("invalid calendar date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("invalid field '{value}', expected one of open, high, low, close, volume")]
    InvalidField { value: String },
    #[error("unknown result kind '{value}', expected one of scalar, call_price")]
    UnknownResultKind { value: String },
    #[error("invalid provider '{value}', expected one of meff, yahoo")]
    InvalidProvider { value: String },

    #[error("market label cannot be empty")]
    EmptyMarket,

    #[error("value '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("value '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("call-price surface must have at least one strike and one maturity")]
    EmptySurface,
    #[error("call-price surface must have one price row per maturity")]
    SurfaceRowMismatch,
    #[error("call-price surface row {row} must have one price per strike")]
    SurfaceColumnMismatch { row: usize },

    #[error("time series contains duplicate date '{value}'")]
    DuplicateSeriesDate { value: String },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
}
