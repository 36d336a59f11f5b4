//! Document index provider trait covering both lookup surfaces

use async_trait::async_trait;

use crate::error::Result;
use crate::types::RetrievedDocument;

/// Trait for the two document lookup paths
///
/// Implementations:
/// - `AzureSearchClient`: paired Azure AI Search indexes
#[async_trait]
pub trait DocumentIndex: Send + Sync {
    /// Exact-match lookup for documents whose title equals one of `titles`,
    /// capped at `titles.len()` results
    async fn lookup_by_titles(&self, titles: &[String]) -> Result<Vec<RetrievedDocument>>;

    /// Vector nearest-neighbor plus semantic re-ranking lookup over free text
    async fn similarity_search(&self, query: &str) -> Result<Vec<RetrievedDocument>>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
