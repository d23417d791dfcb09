//! Symbol resolution
//!
//! Maps a company name or ticker to a tradable symbol. Never fails: any
//! search error or empty result falls back to the query as given.

use super::QuoteProvider;

/// Resolve free text to a ticker, falling back to `query` unchanged
pub async fn resolve(provider: &dyn QuoteProvider, query: &str) -> String {
    match provider.search_symbol(query).await {
        Ok(Some(symbol)) => {
            if symbol != query {
                tracing::debug!(query, symbol = %symbol, "Resolved symbol");
            }
            symbol
        }
        Ok(None) => {
            tracing::debug!(query, "No search match, using query as symbol");
            query.to_string()
        }
        Err(e) => {
            tracing::debug!(query, error = %e, "Symbol search failed, using query as symbol");
            query.to_string()
        }
    }
}
