use crate::provider::{CapabilitySet, MarketDataProvider, ProviderId, ResolveError};
use crate::query::{MarketDataQuery, ResultKind};
use crate::{CallPriceSurface, MarketData, MarketDate, SymbolDefinition, Ticker, TimeSeries};

use super::{offline_error, InstrumentRecord, RecordedDay};

/// Snapshot adapter for the retired consumer finance-data API.
///
/// Replays recorded GOOG daily history from early 2011 together with the
/// option chains captured in the same session, collapsed into one
/// call-price surface per underlying.
#[derive(Debug, Clone)]
pub struct YahooAdapter {
    online: bool,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self { online: true }
    }
}

impl YahooAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapter that fails every operation with a connectivity error.
    pub fn with_offline() -> Self {
        Self { online: false }
    }

    fn ensure_online(&self) -> Result<(), ResolveError> {
        if self.online {
            Ok(())
        } else {
            Err(offline_error(ProviderId::Yahoo.as_str()))
        }
    }

    fn instrument(&self, ticker: &Ticker) -> Option<&'static InstrumentRecord> {
        YAHOO_INSTRUMENTS
            .iter()
            .find(|record| record.ticker == ticker.as_str())
    }
}

impl MarketDataProvider for YahooAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::full()
    }

    fn test_connectivity(&self) -> Result<(), ResolveError> {
        self.ensure_online()?;
        if YAHOO_INSTRUMENTS.is_empty() {
            return Err(ResolveError::connectivity(
                "yahoo snapshot returned an empty instrument list",
            ));
        }
        Ok(())
    }

    fn market_data(&self, query: &MarketDataQuery) -> Result<MarketData, ResolveError> {
        self.ensure_online()?;

        let record = self
            .instrument(&query.ticker)
            .ok_or_else(|| ResolveError::unknown_symbol(&query.ticker, ProviderId::Yahoo))?;

        match query.result_kind {
            ResultKind::Scalar => {
                let day = record
                    .days
                    .iter()
                    .find(|day| day.date() == query.date)
                    .ok_or_else(|| {
                        ResolveError::no_data(format!(
                            "no historical quote for '{}' on {}",
                            query.ticker, query.date
                        ))
                    })?;

                MarketData::scalar(day.date(), day.field_value(query.field))
                    .map_err(ResolveError::from)
            }
            ResultKind::CallPrice => {
                let chain = YAHOO_OPTION_CHAINS
                    .iter()
                    .find(|chain| {
                        chain.ticker == query.ticker.as_str() && chain.date() == query.date
                    })
                    .ok_or_else(|| {
                        ResolveError::no_data(format!(
                            "no recorded option chain for '{}' on {}",
                            query.ticker, query.date
                        ))
                    })?;

                Ok(MarketData::call_price(chain.date(), chain.build()?))
            }
        }
    }

    fn time_series(
        &self,
        query: &MarketDataQuery,
        end: MarketDate,
    ) -> Result<TimeSeries, ResolveError> {
        self.ensure_online()?;

        if query.result_kind != ResultKind::Scalar {
            return Err(ResolveError::unsupported_result_type(
                "yahoo time series are only recorded for scalar results",
            ));
        }

        let record = self
            .instrument(&query.ticker)
            .ok_or_else(|| ResolveError::unknown_symbol(&query.ticker, ProviderId::Yahoo))?;

        let points = record
            .days
            .iter()
            .filter(|day| {
                let date = day.date();
                date >= query.date && date <= end
            })
            .map(|day| MarketData::scalar(day.date(), day.field_value(query.field)))
            .collect::<Result<Vec<_>, _>>()?;

        if points.is_empty() {
            return Err(ResolveError::no_data(format!(
                "no historical quotes for '{}' between {} and {}",
                query.ticker, query.date, end
            )));
        }

        TimeSeries::new(points).map_err(ResolveError::from)
    }

    fn supported_tickers(&self, prefix: &str) -> Result<Vec<SymbolDefinition>, ResolveError> {
        self.ensure_online()?;

        let normalized = prefix.trim().to_ascii_uppercase();
        YAHOO_INSTRUMENTS
            .iter()
            .filter(|record| record.ticker.starts_with(&normalized))
            .map(|record| {
                let name = Ticker::parse(record.ticker).map_err(ResolveError::from)?;
                Ok(SymbolDefinition::new(name, record.description))
            })
            .collect()
    }
}

/// Recorded option chain collapsed to a call-price surface.
struct RecordedChain {
    ticker: &'static str,
    year: i32,
    month: u8,
    day: u8,
    underlying_price: f64,
    strikes: &'static [f64],
    /// Expirations as year fractions from the recording date.
    maturities: &'static [f64],
    /// Mid call prices, `[maturity][strike]`.
    prices: &'static [&'static [f64]],
}

impl RecordedChain {
    fn date(&self) -> MarketDate {
        MarketDate::from_ymd(self.year, self.month, self.day)
            .expect("recorded snapshot dates are valid")
    }

    fn build(&self) -> Result<CallPriceSurface, ResolveError> {
        CallPriceSurface::new(
            self.underlying_price,
            self.strikes.to_vec(),
            self.maturities.to_vec(),
            self.prices.iter().map(|row| row.to_vec()).collect(),
        )
        .map_err(ResolveError::from)
    }
}

macro_rules! day {
    ($y:literal-$m:literal-$d:literal, $o:literal, $h:literal, $l:literal, $c:literal, $v:literal) => {
        RecordedDay {
            year: $y,
            month: $m,
            day: $d,
            open: $o,
            high: $h,
            low: $l,
            close: $c,
            volume: $v,
        }
    };
}

static YAHOO_INSTRUMENTS: &[InstrumentRecord] = &[
    InstrumentRecord {
        ticker: "AAPL",
        description: "NasdaqGS - Apple Inc.",
        days: &[
            day!(2011-1-31, 335.80, 340.04, 334.30, 339.32, 13_457_500.0),
            day!(2011-2-1, 341.30, 345.65, 340.98, 345.03, 14_120_600.0),
            day!(2011-2-2, 344.45, 345.25, 343.55, 344.32, 9_570_200.0),
            day!(2011-2-3, 343.80, 344.44, 340.31, 343.44, 10_715_400.0),
            day!(2011-2-4, 343.64, 346.70, 343.51, 346.50, 10_301_100.0),
        ],
    },
    InstrumentRecord {
        ticker: "GOOG",
        description: "NasdaqGS - Google Inc.",
        days: &[
            day!(2011-1-31, 603.60, 604.47, 595.55, 600.36, 2_365_000.0),
            day!(2011-2-1, 604.49, 613.35, 603.11, 611.04, 2_908_000.0),
            day!(2011-2-2, 611.00, 614.34, 609.21, 612.00, 1_806_000.0),
            day!(2011-2-3, 609.48, 611.45, 606.13, 610.15, 1_785_000.0),
            day!(2011-2-4, 610.31, 611.49, 606.93, 610.98, 1_577_000.0),
        ],
    },
    InstrumentRecord {
        ticker: "MSFT",
        description: "NasdaqGS - Microsoft Corporation",
        days: &[
            day!(2011-1-31, 27.59, 27.79, 27.41, 27.73, 49_094_700.0),
            day!(2011-2-1, 27.80, 28.06, 27.61, 27.99, 60_266_200.0),
            day!(2011-2-2, 27.94, 28.00, 27.68, 27.85, 42_845_600.0),
            day!(2011-2-3, 27.71, 27.72, 27.32, 27.65, 53_059_500.0),
            day!(2011-2-4, 27.65, 27.81, 27.50, 27.77, 42_927_400.0),
        ],
    },
    InstrumentRecord {
        ticker: "YHOO",
        description: "NasdaqGS - Yahoo! Inc.",
        days: &[
            day!(2011-1-31, 15.91, 16.17, 15.85, 16.12, 14_204_100.0),
            day!(2011-2-1, 16.18, 16.36, 16.05, 16.29, 16_880_300.0),
            day!(2011-2-2, 16.26, 16.35, 16.11, 16.20, 11_960_900.0),
            day!(2011-2-3, 16.15, 16.28, 16.01, 16.22, 12_470_800.0),
            day!(2011-2-4, 16.22, 16.40, 16.15, 16.38, 13_325_600.0),
        ],
    },
];

// Chains recorded alongside the 2011-01-31 GOOG session; expirations were
// the February and March monthlies plus the June quarterly.
static YAHOO_OPTION_CHAINS: &[RecordedChain] = &[RecordedChain {
    ticker: "GOOG",
    year: 2011,
    month: 1,
    day: 31,
    underlying_price: 600.36,
    strikes: &[560.0, 580.0, 600.0, 620.0, 640.0],
    maturities: &[0.052, 0.129, 0.378],
    prices: &[
        &[42.10, 24.60, 11.45, 3.90, 1.05],
        &[48.75, 33.20, 20.55, 11.30, 5.45],
        &[60.40, 46.80, 34.90, 24.95, 17.10],
    ],
}];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Field;
    use crate::ResolveErrorKind;

    fn query(ticker: &str, date: &str, field: Field) -> MarketDataQuery {
        MarketDataQuery::new(
            Ticker::parse(ticker).expect("ticker"),
            MarketDate::parse(date).expect("date"),
            field,
            ResultKind::Scalar,
        )
    }

    #[test]
    fn single_day_history_matches_recording() {
        let adapter = YahooAdapter::new();

        let open = adapter
            .market_data(&query("GOOG", "2011-01-31", Field::Open))
            .expect("must resolve");
        let close = adapter
            .market_data(&query("GOOG", "2011-01-31", Field::Close))
            .expect("must resolve");

        let MarketData::Scalar { value: open, .. } = open else {
            panic!("expected a scalar result");
        };
        let MarketData::Scalar { value: close, .. } = close else {
            panic!("expected a scalar result");
        };
        assert!((open - 603.0).abs() < 1.0);
        assert!((close - 600.0).abs() < 1.0);
    }

    #[test]
    fn two_day_history_is_most_recent_first() {
        let adapter = YahooAdapter::new();
        let series = adapter
            .time_series(
                &query("GOOG", "2011-01-31", Field::Close),
                MarketDate::parse("2011-02-01").expect("date"),
            )
            .expect("must resolve");

        assert_eq!(series.len(), 2);
        let dates = series.dates();
        assert_eq!(dates[0], MarketDate::parse("2011-02-01").expect("date"));
        assert_eq!(dates[1], MarketDate::parse("2011-01-31").expect("date"));

        let MarketData::Scalar { value: latest, .. } = series.points()[0] else {
            panic!("expected a scalar result");
        };
        assert!((latest - 611.0).abs() < 1.0);
    }

    #[test]
    fn option_chain_is_exposed_as_call_price_surface() {
        let adapter = YahooAdapter::new();
        let query = MarketDataQuery::new(
            Ticker::parse("GOOG").expect("ticker"),
            MarketDate::parse("2011-01-31").expect("date"),
            Field::Close,
            ResultKind::CallPrice,
        );

        let data = adapter.market_data(&query).expect("must resolve");
        let MarketData::CallPrice { surface, .. } = data else {
            panic!("expected a call-price result");
        };
        assert_eq!(surface.maturities.len(), 3);
        assert_eq!(surface.prices[0].len(), surface.strikes.len());
    }

    #[test]
    fn search_matches_prefix_case_insensitively() {
        let adapter = YahooAdapter::new();
        let upper = adapter.supported_tickers("GO").expect("must resolve");
        let lower = adapter.supported_tickers("go").expect("must resolve");

        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 1);
        assert_eq!(upper[0].name.as_str(), "GOOG");
    }

    #[test]
    fn offline_adapter_reports_connectivity_error() {
        let adapter = YahooAdapter::with_offline();
        let error = adapter
            .supported_tickers("G")
            .expect_err("search must fail");
        assert_eq!(error.kind(), ResolveErrorKind::Connectivity);
    }
}
