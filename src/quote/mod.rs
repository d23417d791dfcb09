//! Quote provider module
//!
//! Symbol search, fundamentals and daily history from an external data feed.
//! The engine only talks to the [`QuoteProvider`] trait; `YahooClient` is the
//! live implementation and `InMemoryProvider` serves fixtures.

mod memory;
mod resolver;
mod types;
mod yahoo;

pub use memory::InMemoryProvider;
pub use resolver::resolve;
pub use types::{Bar, HistoryPeriod, ProviderError, RawQuote};
pub use yahoo::{YahooClient, YahooConfig, YAHOO_API_URL};

use async_trait::async_trait;

/// Trait for quote data sources
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Best-guess ticker for free text, `None` when nothing matches
    async fn search_symbol(&self, text: &str) -> Result<Option<String>, ProviderError>;
    /// Sparse quote/fundamental record for a ticker
    async fn get_quote(&self, ticker: &str) -> Result<RawQuote, ProviderError>;
    /// Daily bars, oldest first; empty when the provider has none
    async fn get_history(
        &self,
        ticker: &str,
        period: HistoryPeriod,
    ) -> Result<Vec<Bar>, ProviderError>;
}
