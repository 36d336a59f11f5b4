//! Azure AI Search client for the paired parent/child indexes
//!
//! The parent index holds full documents and serves the exact title-filtered
//! lookup; the child index holds chunks with a vector field and serves the
//! vector/semantic similarity lookup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::types::RetrievedDocument;

use super::index::DocumentIndex;

/// Azure AI Search client over both indexes of a namespace
pub struct AzureSearchClient {
    http: reqwest::Client,
    config: SearchConfig,
    parent_index: String,
    child_index: String,
}

impl AzureSearchClient {
    /// Create a new client sharing an existing HTTP client handle
    pub fn new(config: &SearchConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            parent_index: config.parent_index(),
            child_index: config.child_index(),
            config: config.clone(),
        }
    }

    /// Search URL for an index
    fn search_url(&self, index: &str) -> String {
        format!(
            "{}/indexes/{}/docs/search?api-version={}",
            self.config.endpoint.trim_end_matches('/'),
            index,
            self.config.api_version
        )
    }

    /// Issue one search request against an index
    async fn search(&self, index: &str, request: &SearchRequest<'_>) -> Result<Vec<SearchHit>> {
        let response = self
            .http
            .post(self.search_url(index))
            .header("api-key", &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Search(format!("Search request to '{}' failed: {}", index, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Search(format!(
                "Search on '{}' failed ({}): {}",
                index, status, body
            )));
        }

        let results: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::Search(format!("Failed to parse search response: {}", e)))?;

        Ok(results.value)
    }

    /// Request body for the exact title-filtered lookup
    fn title_request(titles: &[String]) -> SearchRequest<'_> {
        SearchRequest {
            search: None,
            filter: Some(title_filter(titles)),
            top: titles.len(),
            select: "title,content",
            vector_queries: None,
            query_type: None,
            semantic_configuration: None,
        }
    }

    /// Request body for the vector + semantic similarity lookup
    fn similarity_request<'a>(&'a self, query: &'a str) -> SearchRequest<'a> {
        SearchRequest {
            search: Some(query),
            filter: None,
            top: self.config.similarity_top,
            select: "title,chunk",
            vector_queries: Some(vec![VectorQuery {
                kind: "text",
                text: query,
                k: self.config.k_nearest_neighbors,
                fields: &self.config.vector_field,
            }]),
            query_type: Some("semantic"),
            semantic_configuration: Some(&self.config.semantic_configuration),
        }
    }
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<String>,
    top: usize,
    select: &'static str,
    #[serde(rename = "vectorQueries", skip_serializing_if = "Option::is_none")]
    vector_queries: Option<Vec<VectorQuery<'a>>>,
    #[serde(rename = "queryType", skip_serializing_if = "Option::is_none")]
    query_type: Option<&'static str>,
    #[serde(
        rename = "semanticConfiguration",
        skip_serializing_if = "Option::is_none"
    )]
    semantic_configuration: Option<&'a str>,
}

/// Vectorizable text query; the service embeds the text server-side
#[derive(Serialize)]
struct VectorQuery<'a> {
    kind: &'static str,
    text: &'a str,
    k: usize,
    fields: &'a str,
}

#[derive(Deserialize)]
struct SearchResponse {
    value: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    chunk: Option<String>,
}

impl SearchHit {
    /// Normalize a hit to the single-body document shape
    ///
    /// The parent index populates `content`, the child index `chunk`.
    fn into_document(self) -> RetrievedDocument {
        let body = self.content.or(self.chunk).unwrap_or_default();
        RetrievedDocument::new(self.title.unwrap_or_default(), body)
    }
}

/// Build an OData filter matching any of the titles exactly
fn title_filter(titles: &[String]) -> String {
    titles
        .iter()
        .map(|title| format!("title eq '{}'", escape_odata(title)))
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Single quotes double inside OData string literals
fn escape_odata(value: &str) -> String {
    value.replace('\'', "''")
}

#[async_trait]
impl DocumentIndex for AzureSearchClient {
    async fn lookup_by_titles(&self, titles: &[String]) -> Result<Vec<RetrievedDocument>> {
        if titles.is_empty() {
            return Ok(Vec::new());
        }

        let request = Self::title_request(titles);
        let hits = self.search(&self.parent_index, &request).await?;
        tracing::debug!(index = %self.parent_index, hits = hits.len(), "filtered lookup");

        Ok(hits.into_iter().map(SearchHit::into_document).collect())
    }

    async fn similarity_search(&self, query: &str) -> Result<Vec<RetrievedDocument>> {
        let request = self.similarity_request(query);
        let hits = self.search(&self.child_index, &request).await?;
        tracing::debug!(index = %self.child_index, hits = hits.len(), "similarity lookup");

        Ok(hits.into_iter().map(SearchHit::into_document).collect())
    }

    fn name(&self) -> &str {
        "azure-search"
    }
}
