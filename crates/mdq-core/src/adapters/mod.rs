//! Snapshot provider adapters.
//!
//! Both upstream services this crate models are gone, so each adapter
//! replays an embedded recording of the daily data its upstream used to
//! serve. The recordings only contain trading days; weekends and holidays
//! are simply absent, which is exactly how the live feeds behaved.

mod meff;
mod yahoo;

pub use meff::MeffAdapter;
pub use yahoo::YahooAdapter;

use crate::query::Field;
use crate::{MarketDate, ResolveError};

/// One recorded trading day for one instrument.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RecordedDay {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl RecordedDay {
    pub(crate) fn date(&self) -> MarketDate {
        MarketDate::from_ymd(self.year, self.month, self.day)
            .expect("recorded snapshot dates are valid")
    }

    pub(crate) const fn field_value(&self, field: Field) -> f64 {
        match field {
            Field::Open => self.open,
            Field::High => self.high,
            Field::Low => self.low,
            Field::Close => self.close,
            Field::Volume => self.volume,
        }
    }
}

/// One instrument in a provider snapshot.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InstrumentRecord {
    pub ticker: &'static str,
    pub description: &'static str,
    pub days: &'static [RecordedDay],
}

pub(crate) fn offline_error(provider: &str) -> ResolveError {
    ResolveError::connectivity(format!(
        "provider '{provider}' is unreachable: connection refused"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_day_exposes_requested_field() {
        let day = RecordedDay {
            year: 2013,
            month: 6,
            day: 3,
            open: 27.80,
            high: 28.24,
            low: 27.55,
            close: 28.06,
            volume: 612_000.0,
        };

        assert_eq!(day.date().to_string(), "2013-06-03");
        assert_eq!(day.field_value(Field::Open), 27.80);
        assert_eq!(day.field_value(Field::Close), 28.06);
        assert_eq!(day.field_value(Field::Volume), 612_000.0);
    }
}
