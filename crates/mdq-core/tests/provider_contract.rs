use std::sync::Arc;

use mdq_core::{
    Field, MarketData, MarketDataProvider, MarketDataQuery, MarketDate, MeffAdapter, ProviderId,
    ResolveErrorKind, ResultKind, Ticker, YahooAdapter,
};

struct ProviderCase {
    id: ProviderId,
    provider: Arc<dyn MarketDataProvider>,
    /// A ticker with recorded scalar history and the window it covers.
    ticker: &'static str,
    window_start: &'static str,
    window_end: &'static str,
    /// A ticker with a recorded call-price surface and its date.
    call_price_ticker: &'static str,
    call_price_date: &'static str,
}

fn provider_cases() -> Vec<ProviderCase> {
    vec![
        ProviderCase {
            id: ProviderId::Meff,
            provider: Arc::new(MeffAdapter::new()),
            ticker: "GRF",
            window_start: "2013-06-03",
            window_end: "2013-06-07",
            call_price_ticker: "BBVA",
            call_price_date: "2013-07-01",
        },
        ProviderCase {
            id: ProviderId::Yahoo,
            provider: Arc::new(YahooAdapter::new()),
            ticker: "GOOG",
            window_start: "2011-01-31",
            window_end: "2011-02-04",
            call_price_ticker: "GOOG",
            call_price_date: "2011-01-31",
        },
    ]
}

fn scalar_query(ticker: &str, date: &str) -> MarketDataQuery {
    MarketDataQuery::new(
        Ticker::parse(ticker).expect("valid ticker"),
        MarketDate::parse(date).expect("valid date"),
        Field::Close,
        ResultKind::Scalar,
    )
}

#[test]
fn connectivity_probe_succeeds_for_all_providers() {
    for case in provider_cases() {
        case.provider
            .test_connectivity()
            .unwrap_or_else(|error| panic!("provider '{}' probe failed: {error}", case.id));
    }
}

#[test]
fn scalar_result_carries_the_requested_date_for_all_providers() {
    for case in provider_cases() {
        let query = scalar_query(case.ticker, case.window_start);
        let data = case
            .provider
            .market_data(&query)
            .unwrap_or_else(|error| panic!("provider '{}' lookup failed: {error}", case.id));

        assert_eq!(data.timestamp(), query.date, "provider '{}': date", case.id);
        assert!(
            matches!(data, MarketData::Scalar { .. }),
            "provider '{}': shape",
            case.id
        );
    }
}

#[test]
fn series_is_descending_aligned_and_within_bounds_for_all_providers() {
    for case in provider_cases() {
        let query = scalar_query(case.ticker, case.window_start);
        let end = MarketDate::parse(case.window_end).expect("valid date");
        let series = case
            .provider
            .time_series(&query, end)
            .unwrap_or_else(|error| panic!("provider '{}' series failed: {error}", case.id));

        let dates = series.dates();
        assert_eq!(dates.len(), series.points().len(), "provider '{}'", case.id);

        for pair in dates.windows(2) {
            assert!(pair[0] > pair[1], "provider '{}': ordering", case.id);
        }

        for (date, point) in dates.iter().zip(series.points()) {
            assert_eq!(*date, point.timestamp(), "provider '{}': alignment", case.id);
            assert!(
                *date >= query.date && *date <= end,
                "provider '{}': bounds",
                case.id
            );
        }
    }
}

#[test]
fn call_price_result_is_a_structured_surface_for_all_providers() {
    for case in provider_cases() {
        let query = MarketDataQuery::new(
            Ticker::parse(case.call_price_ticker).expect("valid ticker"),
            MarketDate::parse(case.call_price_date).expect("valid date"),
            Field::Close,
            ResultKind::CallPrice,
        );

        let data = case
            .provider
            .market_data(&query)
            .unwrap_or_else(|error| panic!("provider '{}' call price failed: {error}", case.id));

        let MarketData::CallPrice { surface, .. } = data else {
            panic!("provider '{}': expected a call-price result", case.id);
        };
        assert!(!surface.strikes.is_empty(), "provider '{}'", case.id);
        assert_eq!(
            surface.prices.len(),
            surface.maturities.len(),
            "provider '{}': surface shape",
            case.id
        );
    }
}

#[test]
fn search_results_all_start_with_the_prefix_for_all_providers() {
    for case in provider_cases() {
        let definitions = case
            .provider
            .supported_tickers("G")
            .unwrap_or_else(|error| panic!("provider '{}' search failed: {error}", case.id));

        for definition in &definitions {
            assert!(
                definition.name.as_str().starts_with('G'),
                "provider '{}': '{}' does not match prefix",
                case.id,
                definition.name
            );
            assert!(
                !definition.description.is_empty(),
                "provider '{}': description",
                case.id
            );
        }
    }
}

#[test]
fn search_with_no_match_is_empty_not_an_error() {
    for case in provider_cases() {
        let definitions = case
            .provider
            .supported_tickers("QQQQ")
            .unwrap_or_else(|error| panic!("provider '{}' search failed: {error}", case.id));
        assert!(definitions.is_empty(), "provider '{}'", case.id);
    }
}

#[test]
fn unknown_ticker_fails_with_unknown_symbol_for_all_providers() {
    for case in provider_cases() {
        let query = scalar_query("NOPE", case.window_start);
        let error = case
            .provider
            .market_data(&query)
            .expect_err("unknown ticker must fail");
        assert_eq!(
            error.kind(),
            ResolveErrorKind::UnknownSymbol,
            "provider '{}'",
            case.id
        );
        assert!(!error.message().is_empty(), "provider '{}'", case.id);
    }
}

#[test]
fn repeated_queries_are_idempotent_for_all_providers() {
    for case in provider_cases() {
        let query = scalar_query(case.ticker, case.window_start);
        let first = case
            .provider
            .market_data(&query)
            .unwrap_or_else(|error| panic!("provider '{}' lookup failed: {error}", case.id));
        let second = case
            .provider
            .market_data(&query)
            .unwrap_or_else(|error| panic!("provider '{}' lookup failed: {error}", case.id));

        assert_eq!(first, second, "provider '{}'", case.id);
    }
}
