use crate::provider::{CapabilitySet, MarketDataProvider, ProviderId, ResolveError};
use crate::query::{MarketDataQuery, ResultKind};
use crate::{CallPriceSurface, MarketData, MarketDate, SymbolDefinition, Ticker, TimeSeries};

use super::{offline_error, InstrumentRecord, RecordedDay};

/// Snapshot adapter for the MEFF Spanish derivatives exchange feed.
///
/// Replays the recorded daily equity closes for the first week of June 2013
/// and one recorded BBVA call-price surface. The live feed was retired; the
/// snapshot preserves the data it served.
#[derive(Debug, Clone)]
pub struct MeffAdapter {
    online: bool,
}

impl Default for MeffAdapter {
    fn default() -> Self {
        Self { online: true }
    }
}

impl MeffAdapter {
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
            Err(offline_error(ProviderId::Meff.as_str()))
        }
    }

    fn instrument(&self, ticker: &Ticker) -> Option<&'static InstrumentRecord> {
        MEFF_EQUITIES
            .iter()
            .find(|record| record.ticker == ticker.as_str())
    }
}

impl MarketDataProvider for MeffAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Meff
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::full()
    }

    fn test_connectivity(&self) -> Result<(), ResolveError> {
        self.ensure_online()?;
        if MEFF_EQUITIES.is_empty() {
            return Err(ResolveError::connectivity(
                "meff snapshot returned an empty instrument list",
            ));
        }
        Ok(())
    }

    fn market_data(&self, query: &MarketDataQuery) -> Result<MarketData, ResolveError> {
        self.ensure_online()?;

        let record = self
            .instrument(&query.ticker)
            .ok_or_else(|| ResolveError::unknown_symbol(&query.ticker, ProviderId::Meff))?;

        match query.result_kind {
            ResultKind::Scalar => {
                let day = record
                    .days
                    .iter()
                    .find(|day| day.date() == query.date)
                    .ok_or_else(|| {
                        ResolveError::no_data(format!(
                            "no trading data for '{}' on {}",
                            query.ticker, query.date
                        ))
                    })?;

                MarketData::scalar(day.date(), day.field_value(query.field))
                    .map_err(ResolveError::from)
            }
            ResultKind::CallPrice => {
                let surface = MEFF_SURFACES
                    .iter()
                    .find(|surface| {
                        surface.ticker == query.ticker.as_str() && surface.date() == query.date
                    })
                    .ok_or_else(|| {
                        ResolveError::no_data(format!(
                            "no recorded call-price surface for '{}' on {}",
                            query.ticker, query.date
                        ))
                    })?;

                Ok(MarketData::call_price(surface.date(), surface.build()?))
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
                "meff time series are only recorded for scalar results",
            ));
        }

        let record = self
            .instrument(&query.ticker)
            .ok_or_else(|| ResolveError::unknown_symbol(&query.ticker, ProviderId::Meff))?;

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
                "no trading data for '{}' between {} and {}",
                query.ticker, query.date, end
            )));
        }

        TimeSeries::new(points).map_err(ResolveError::from)
    }

    fn supported_tickers(&self, prefix: &str) -> Result<Vec<SymbolDefinition>, ResolveError> {
        self.ensure_online()?;

        let normalized = prefix.trim().to_ascii_uppercase();
        MEFF_EQUITIES
            .iter()
            .filter(|record| record.ticker.starts_with(&normalized))
            .map(|record| {
                let name = Ticker::parse(record.ticker).map_err(ResolveError::from)?;
                Ok(SymbolDefinition::new(name, record.description))
            })
            .collect()
    }
}

const MEFF_EQUITY: &str = "MEFF Market Equity";

/// Recorded call-price surface in const-friendly form.
struct RecordedSurface {
    ticker: &'static str,
    year: i32,
    month: u8,
    day: u8,
    underlying_price: f64,
    strikes: &'static [f64],
    maturities: &'static [f64],
    prices: &'static [&'static [f64]],
}

impl RecordedSurface {
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

// Trading week of 2013-06-03 to 2013-06-07; the 8th/9th were a weekend.
static MEFF_EQUITIES: &[InstrumentRecord] = &[
    InstrumentRecord {
        ticker: "ABE",
        description: MEFF_EQUITY,
        days: &[
            day!(2013-6-3, 13.10, 13.31, 13.02, 13.24, 1_420_000.0),
            day!(2013-6-4, 13.24, 13.40, 13.11, 13.18, 1_150_000.0),
            day!(2013-6-5, 13.18, 13.22, 12.95, 13.01, 1_360_000.0),
            day!(2013-6-6, 13.01, 13.15, 12.88, 13.08, 1_205_000.0),
            day!(2013-6-7, 13.08, 13.30, 13.05, 13.27, 1_332_000.0),
        ],
    },
    InstrumentRecord {
        ticker: "BBVA",
        description: MEFF_EQUITY,
        days: &[
            day!(2013-6-3, 6.84, 6.95, 6.78, 6.91, 31_200_000.0),
            day!(2013-6-4, 6.91, 7.02, 6.86, 6.94, 28_750_000.0),
            day!(2013-6-5, 6.94, 6.97, 6.71, 6.76, 33_400_000.0),
            day!(2013-6-6, 6.76, 6.84, 6.62, 6.70, 35_100_000.0),
            day!(2013-6-7, 6.70, 6.90, 6.68, 6.88, 30_950_000.0),
        ],
    },
    InstrumentRecord {
        ticker: "GAM",
        description: MEFF_EQUITY,
        days: &[
            day!(2013-6-3, 2.41, 2.50, 2.38, 2.47, 4_870_000.0),
            day!(2013-6-4, 2.47, 2.55, 2.44, 2.52, 5_020_000.0),
            day!(2013-6-5, 2.52, 2.54, 2.43, 2.45, 4_410_000.0),
            day!(2013-6-6, 2.45, 2.49, 2.39, 2.43, 4_655_000.0),
            day!(2013-6-7, 2.43, 2.52, 2.42, 2.50, 4_980_000.0),
        ],
    },
    InstrumentRecord {
        ticker: "GAS",
        description: MEFF_EQUITY,
        days: &[
            day!(2013-6-3, 15.86, 16.10, 15.74, 16.02, 2_140_000.0),
            day!(2013-6-4, 16.02, 16.24, 15.92, 16.11, 1_980_000.0),
            day!(2013-6-5, 16.11, 16.15, 15.80, 15.88, 2_260_000.0),
            day!(2013-6-6, 15.88, 16.00, 15.65, 15.79, 2_305_000.0),
            day!(2013-6-7, 15.79, 16.08, 15.76, 16.04, 2_090_000.0),
        ],
    },
    InstrumentRecord {
        ticker: "GRF",
        description: MEFF_EQUITY,
        days: &[
            day!(2013-6-3, 27.80, 28.24, 27.55, 28.06, 612_000.0),
            day!(2013-6-4, 28.06, 29.05, 27.98, 28.93, 688_000.0),
            day!(2013-6-5, 28.93, 29.00, 28.41, 28.60, 574_000.0),
            day!(2013-6-6, 28.60, 28.88, 28.34, 28.75, 539_000.0),
            day!(2013-6-7, 28.75, 29.21, 28.66, 29.10, 601_000.0),
        ],
    },
    InstrumentRecord {
        ticker: "IBE",
        description: MEFF_EQUITY,
        days: &[
            day!(2013-6-3, 4.01, 4.09, 3.97, 4.06, 24_300_000.0),
            day!(2013-6-4, 4.06, 4.12, 4.02, 4.08, 22_150_000.0),
            day!(2013-6-5, 4.08, 4.10, 3.94, 3.98, 25_800_000.0),
            day!(2013-6-6, 3.98, 4.04, 3.91, 3.96, 26_400_000.0),
            day!(2013-6-7, 3.96, 4.07, 3.95, 4.05, 23_700_000.0),
        ],
    },
    InstrumentRecord {
        ticker: "REP",
        description: MEFF_EQUITY,
        days: &[
            day!(2013-6-3, 16.31, 16.55, 16.20, 16.48, 6_820_000.0),
            day!(2013-6-4, 16.48, 16.70, 16.40, 16.55, 6_310_000.0),
            day!(2013-6-5, 16.55, 16.58, 16.18, 16.26, 7_040_000.0),
            day!(2013-6-6, 16.26, 16.40, 16.05, 16.19, 7_215_000.0),
            day!(2013-6-7, 16.19, 16.52, 16.16, 16.47, 6_590_000.0),
        ],
    },
    InstrumentRecord {
        ticker: "SAN",
        description: MEFF_EQUITY,
        days: &[
            day!(2013-6-3, 5.38, 5.47, 5.33, 5.44, 54_600_000.0),
            day!(2013-6-4, 5.44, 5.53, 5.40, 5.47, 49_800_000.0),
            day!(2013-6-5, 5.47, 5.49, 5.28, 5.33, 57_300_000.0),
            day!(2013-6-6, 5.33, 5.40, 5.21, 5.28, 59_100_000.0),
            day!(2013-6-7, 5.28, 5.44, 5.26, 5.42, 52_400_000.0),
        ],
    },
    InstrumentRecord {
        ticker: "TEF",
        description: MEFF_EQUITY,
        days: &[
            day!(2013-6-3, 9.92, 10.08, 9.85, 10.03, 18_900_000.0),
            day!(2013-6-4, 10.03, 10.16, 9.97, 10.08, 17_350_000.0),
            day!(2013-6-5, 10.08, 10.11, 9.81, 9.89, 19_600_000.0),
            day!(2013-6-6, 9.89, 9.98, 9.70, 9.82, 20_250_000.0),
            day!(2013-6-7, 9.82, 10.05, 9.80, 10.01, 18_400_000.0),
        ],
    },
];

// BBVA option surface recorded on 2013-07-01 (EU market session).
static MEFF_SURFACES: &[RecordedSurface] = &[RecordedSurface {
    ticker: "BBVA",
    year: 2013,
    month: 7,
    day: 1,
    underlying_price: 6.44,
    strikes: &[5.5, 6.0, 6.5, 7.0, 7.5],
    maturities: &[0.047, 0.131, 0.381, 0.631],
    prices: &[
        &[0.96, 0.50, 0.14, 0.02, 0.01],
        &[1.00, 0.58, 0.25, 0.08, 0.02],
        &[1.09, 0.72, 0.42, 0.22, 0.10],
        &[1.18, 0.84, 0.56, 0.35, 0.20],
    ],
}];
