use mdq_core::MarketDataResolver;
use serde_json::json;

use crate::error::CliError;

use super::CommandResult;

pub fn run(resolver: &MarketDataResolver) -> Result<CommandResult, CliError> {
    if let Err(error) = resolver.test_connectivity() {
        return Ok(CommandResult::fail(&error));
    }

    let data = json!({
        "provider": resolver.provider_id(),
        "reachable": true,
    });

    Ok(CommandResult::ok(data))
}
