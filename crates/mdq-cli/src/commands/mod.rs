mod get;
mod probe;
mod providers;
mod series;
mod tickers;

use std::sync::Arc;
use std::time::Instant;

use mdq_core::{
    Envelope, EnvelopeError, EnvelopeMeta, MarketDataProvider, MarketDataResolver, MeffAdapter,
    ResolveError, YahooAdapter,
};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::cli::{Cli, Command, ProviderSelector};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Failed resolution rendered inside the envelope rather than aborting.
    pub fn fail(error: &ResolveError) -> Self {
        Self {
            data: Value::Null,
            warnings: Vec::new(),
            errors: vec![EnvelopeError::from(error)],
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

pub fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let provider = build_provider(cli.provider);
    let provider_id = provider.id();
    let resolver = MarketDataResolver::new(provider);

    let started = Instant::now();
    let result = match &cli.command {
        Command::Probe => probe::run(&resolver),
        Command::Get(args) => get::run(&resolver, args),
        Command::Series(args) => series::run(&resolver, args),
        Command::Tickers(args) => tickers::run(&resolver, args),
        Command::Providers => providers::run(),
    }?;
    let latency_ms = started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64;

    let mut meta = EnvelopeMeta::new(request_id(), generated_at(), provider_id, latency_ms)?;
    for warning in result.warnings {
        meta.push_warning(warning);
    }

    Ok(Envelope::with_errors(meta, result.data, result.errors))
}

fn build_provider(selector: ProviderSelector) -> Arc<dyn MarketDataProvider> {
    match selector {
        ProviderSelector::Meff => Arc::new(MeffAdapter::new()),
        ProviderSelector::Yahoo => Arc::new(YahooAdapter::new()),
    }
}

fn request_id() -> String {
    format!("req-{}", Uuid::new_v4().simple())
}

fn generated_at() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("<unformattable>"))
}
