use serde::Serialize;

use mdq_core::{
    Field, MarketData, MarketDataQuery, MarketDataResolver, MarketDate, ResultKind, Ticker,
};

use crate::cli::SeriesArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct SeriesResponseData {
    ticker: Ticker,
    field: Field,
    dates: Vec<MarketDate>,
    points: Vec<MarketData>,
}

pub fn run(resolver: &MarketDataResolver, args: &SeriesArgs) -> Result<CommandResult, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;
    let from = MarketDate::parse(&args.from)?;
    let to = MarketDate::parse(&args.to)?;
    let field = args.field.parse::<Field>()?;

    let query = MarketDataQuery::new(ticker.clone(), from, field, ResultKind::Scalar);
    let series = match resolver.time_series(&query, to) {
        Ok(series) => series,
        Err(error) => return Ok(CommandResult::fail(&error)),
    };

    let dates = series.dates();
    let points = series.into_points();
    let data = serde_json::to_value(SeriesResponseData {
        ticker,
        field,
        dates,
        points,
    })?;

    Ok(CommandResult::ok(data))
}
