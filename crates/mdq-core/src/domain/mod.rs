mod date;
mod models;
mod ticker;

pub use date::MarketDate;
pub use models::{CallPriceSurface, MarketData, SymbolDefinition, TimeSeries};
pub use ticker::Ticker;
