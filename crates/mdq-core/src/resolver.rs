use std::sync::Arc;

use crate::provider::{CapabilitySet, MarketDataProvider, ProviderId, ResolveError};
use crate::{MarketData, MarketDataQuery, MarketDate, SymbolDefinition, TimeSeries};

/// Normalizing front door over one backing provider.
///
/// The resolver performs no retries, caching, or fan-out; it dispatches each
/// query to its provider and enforces the parts of the contract callers rely
/// on: capability checks before the call, and date-bound/shape checks on the
/// way back so out-of-range provider output never passes through silently.
pub struct MarketDataResolver {
    provider: Arc<dyn MarketDataProvider>,
}

impl MarketDataResolver {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_id(&self) -> ProviderId {
        self.provider.id()
    }

    pub fn capabilities(&self) -> CapabilitySet {
        self.provider.capabilities()
    }

    pub fn test_connectivity(&self) -> Result<(), ResolveError> {
        self.provider.test_connectivity()
    }

    /// Resolve exactly one data point for `query.date`.
    pub fn market_data(&self, query: &MarketDataQuery) -> Result<MarketData, ResolveError> {
        self.check_kind_supported(query)?;

        let data = self.provider.market_data(query)?;

        if data.timestamp() != query.date {
            return Err(ResolveError::internal(format!(
                "provider '{}' returned data for {} outside the requested date {}",
                self.provider.id(),
                data.timestamp(),
                query.date
            )));
        }

        if data.kind() != query.result_kind {
            return Err(ResolveError::internal(format!(
                "provider '{}' returned a '{}' result for a '{}' query",
                self.provider.id(),
                data.kind(),
                query.result_kind
            )));
        }

        Ok(data)
    }

    /// Resolve all points between `query.date` and `end`, inclusive on both
    /// sides, most recent first.
    pub fn time_series(
        &self,
        query: &MarketDataQuery,
        end: MarketDate,
    ) -> Result<TimeSeries, ResolveError> {
        self.check_kind_supported(query)?;

        if !self.provider.capabilities().time_series {
            return Err(ResolveError::invalid_request(format!(
                "provider '{}' does not support time series",
                self.provider.id()
            )));
        }

        if end < query.date {
            return Err(ResolveError::invalid_request(format!(
                "time series end {} precedes start {}",
                end, query.date
            )));
        }

        let series = self.provider.time_series(query, end)?;

        if series.is_empty() {
            return Err(ResolveError::no_data(format!(
                "no data for '{}' between {} and {}",
                query.ticker, query.date, end
            )));
        }

        for point in series.points() {
            let date = point.timestamp();
            if date < query.date || date > end {
                return Err(ResolveError::internal(format!(
                    "provider '{}' returned data for {} outside the requested range {}..{}",
                    self.provider.id(),
                    date,
                    query.date,
                    end
                )));
            }
        }

        Ok(series)
    }

    /// Discover symbols whose name starts with `prefix`.
    pub fn supported_tickers(&self, prefix: &str) -> Result<Vec<SymbolDefinition>, ResolveError> {
        if !self.provider.capabilities().search {
            return Err(ResolveError::invalid_request(format!(
                "provider '{}' does not support symbol search",
                self.provider.id()
            )));
        }

        let definitions = self.provider.supported_tickers(prefix)?;

        let normalized = prefix.trim().to_ascii_uppercase();
        for definition in &definitions {
            if !definition.name.as_str().starts_with(&normalized) {
                return Err(ResolveError::internal(format!(
                    "provider '{}' returned symbol '{}' not matching prefix '{}'",
                    self.provider.id(),
                    definition.name,
                    normalized
                )));
            }
        }

        Ok(definitions)
    }

    fn check_kind_supported(&self, query: &MarketDataQuery) -> Result<(), ResolveError> {
        if !self.provider.capabilities().supports_kind(query.result_kind) {
            return Err(ResolveError::unsupported_result_type(format!(
                "provider '{}' does not produce '{}' results",
                self.provider.id(),
                query.result_kind
            )));
        }
        Ok(())
    }
}
