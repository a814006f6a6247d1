//! Core contracts for mdq.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The market-data query and result shapes
//! - The provider contract and structured resolution errors
//! - A single-provider resolver enforcing the contract invariants
//! - Snapshot adapters for the two retired upstream sources

pub mod adapters;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod provider;
pub mod query;
pub mod resolver;

pub use adapters::{MeffAdapter, YahooAdapter};
pub use domain::{CallPriceSurface, MarketData, MarketDate, SymbolDefinition, Ticker, TimeSeries};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};
pub use error::ValidationError;
pub use provider::{
    CapabilitySet, MarketDataProvider, ProviderId, ResolveError, ResolveErrorKind,
};
pub use query::{Field, MarketDataQuery, ResultKind};
pub use resolver::MarketDataResolver;
