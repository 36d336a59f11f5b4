//! Completion provider traits for title extraction and answer generation

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ChatMessage, TitleExtraction};

/// Structured-output extraction of document titles from free text
#[async_trait]
pub trait TitleExtractor: Send + Sync {
    /// Extract the document titles referenced by a query
    ///
    /// A response that fails to validate against the titles schema is
    /// reported as [`TitleExtraction::Unparsed`], not as an error.
    async fn extract_titles(&self, query: &str) -> Result<TitleExtraction>;
}

/// Conversational completion: one reply for an ordered message sequence
#[async_trait]
pub trait ChatCompleter: Send + Sync {
    /// Generate a single reply for the given message sequence
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model or deployment identifier
    fn model(&self) -> &str;
}
