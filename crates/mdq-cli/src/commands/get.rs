use serde::Serialize;

use mdq_core::{
    Field, MarketData, MarketDataQuery, MarketDataResolver, MarketDate, ResultKind, Ticker,
};

use crate::cli::GetArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct GetResponseData {
    query: MarketDataQuery,
    result: MarketData,
}

pub fn run(resolver: &MarketDataResolver, args: &GetArgs) -> Result<CommandResult, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;
    let date = MarketDate::parse(&args.date)?;
    let field = args.field.parse::<Field>()?;
    let kind = args.kind.parse::<ResultKind>()?;

    let mut query = MarketDataQuery::new(ticker, date, field, kind);
    if let Some(market) = &args.market {
        query = query.with_market(market.clone())?;
    }

    let result = match resolver.market_data(&query) {
        Ok(result) => result,
        Err(error) => return Ok(CommandResult::fail(&error)),
    };
    let data = serde_json::to_value(GetResponseData { query, result })?;

    Ok(CommandResult::ok(data))
}
