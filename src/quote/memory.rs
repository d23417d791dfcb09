//! In-memory quote provider for fixtures and offline runs

use super::{Bar, HistoryPeriod, ProviderError, QuoteProvider, RawQuote};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

/// Fixture file layout
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FixtureFile {
    quotes: Vec<RawQuote>,
    aliases: HashMap<String, String>,
    history: HashMap<String, Vec<Bar>>,
}

/// Serves canned quotes, search aliases and history
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    quotes: HashMap<String, RawQuote>,
    aliases: HashMap<String, String>,
    history: HashMap<String, Vec<Bar>>,
    fail_search: bool,
}

impl InMemoryProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Load fixtures from JSON (`quotes`, `aliases`, `history` keys)
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let file: FixtureFile = serde_json::from_str(json)?;
        let mut provider = Self::new();
        for quote in file.quotes {
            provider = provider.with_quote(quote);
        }
        for (text, symbol) in file.aliases {
            provider = provider.with_alias(text, symbol);
        }
        for (symbol, bars) in file.history {
            provider = provider.with_history(symbol, bars);
        }
        Ok(provider)
    }

    /// Register a quote under its symbol
    pub fn with_quote(mut self, quote: RawQuote) -> Self {
        self.quotes.insert(quote.symbol.to_uppercase(), quote);
        self
    }

    /// Map free text (case-insensitive) to a ticker for search
    pub fn with_alias(mut self, text: impl Into<String>, symbol: impl Into<String>) -> Self {
        self.aliases
            .insert(text.into().to_uppercase(), symbol.into());
        self
    }

    /// Register daily bars for a symbol
    pub fn with_history(mut self, symbol: impl Into<String>, bars: Vec<Bar>) -> Self {
        self.history.insert(symbol.into().to_uppercase(), bars);
        self
    }

    /// Make every search call fail
    pub fn with_failing_search(mut self) -> Self {
        self.fail_search = true;
        self
    }
}

#[async_trait]
impl QuoteProvider for InMemoryProvider {
    async fn search_symbol(&self, text: &str) -> Result<Option<String>, ProviderError> {
        if self.fail_search {
            return Err(ProviderError::Status {
                status: 503,
                body: "search unavailable".to_string(),
            });
        }

        let key = text.to_uppercase();
        if let Some(symbol) = self.aliases.get(&key) {
            return Ok(Some(symbol.clone()));
        }
        Ok(self.quotes.get(&key).map(|q| q.symbol.clone()))
    }

    async fn get_quote(&self, ticker: &str) -> Result<RawQuote, ProviderError> {
        self.quotes
            .get(&ticker.to_uppercase())
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(ticker.to_string()))
    }

    async fn get_history(
        &self,
        ticker: &str,
        _period: HistoryPeriod,
    ) -> Result<Vec<Bar>, ProviderError> {
        Ok(self
            .history
            .get(&ticker.to_uppercase())
            .cloned()
            .unwrap_or_default())
    }
}
