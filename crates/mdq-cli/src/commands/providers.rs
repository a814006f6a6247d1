use serde::Serialize;

use mdq_core::{MarketDataProvider, MeffAdapter, ProviderId, YahooAdapter};

use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct ProviderInfo {
    id: ProviderId,
    operations: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct ProvidersResponseData {
    providers: Vec<ProviderInfo>,
}

pub fn run() -> Result<CommandResult, CliError> {
    let meff = MeffAdapter::new();
    let yahoo = YahooAdapter::new();

    let providers = [&meff as &dyn MarketDataProvider, &yahoo]
        .iter()
        .map(|provider| ProviderInfo {
            id: provider.id(),
            operations: provider.capabilities().supported_operations(),
        })
        .collect();

    let data = serde_json::to_value(ProvidersResponseData { providers })?;
    Ok(CommandResult::ok(data))
}
