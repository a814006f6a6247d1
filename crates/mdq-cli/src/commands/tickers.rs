use serde::Serialize;

use mdq_core::{MarketDataResolver, SymbolDefinition};

use crate::cli::TickersArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct TickersResponseData {
    prefix: String,
    matches: Vec<SymbolDefinition>,
}

pub fn run(resolver: &MarketDataResolver, args: &TickersArgs) -> Result<CommandResult, CliError> {
    let matches = match resolver.supported_tickers(&args.prefix) {
        Ok(matches) => matches,
        Err(error) => return Ok(CommandResult::fail(&error)),
    };
    let empty = matches.is_empty();

    let data = serde_json::to_value(TickersResponseData {
        prefix: args.prefix.clone(),
        matches,
    })?;

    let result = CommandResult::ok(data);
    if empty {
        return Ok(result.with_warning(format!(
            "no symbols match prefix '{}'",
            args.prefix
        )));
    }

    Ok(result)
}
