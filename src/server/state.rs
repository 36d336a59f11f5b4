//! Application state for the chat server

use std::sync::Arc;

use crate::chat::ChatRouter;
use crate::config::ChatConfig;
use crate::error::Result;
use crate::providers::{
    AzureOpenAiClient, AzureSearchClient, ChatCompleter, DocumentIndex, TitleExtractor,
};

/// Shared application state
///
/// Provider clients are constructed once at startup and injected into the
/// router; nothing here is per-request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ChatConfig,
    router: ChatRouter,
}

impl AppState {
    /// Create new application state from configuration
    pub fn new(config: ChatConfig) -> Result<Self> {
        tracing::info!("Initializing chat application state...");

        // One HTTP client handle shared by both collaborators
        let http = reqwest::Client::new();

        let openai = Arc::new(AzureOpenAiClient::new(&config.openai, http.clone()));
        tracing::info!(
            "Azure OpenAI client initialized (deployment: {})",
            config.openai.chat_deployment
        );

        let search = Arc::new(AzureSearchClient::new(&config.search, http));
        tracing::info!(
            "Azure AI Search client initialized (indexes: {}, {})",
            config.search.parent_index(),
            config.search.child_index()
        );

        let router = ChatRouter::new(
            openai.clone() as Arc<dyn TitleExtractor>,
            search as Arc<dyn DocumentIndex>,
            openai as Arc<dyn ChatCompleter>,
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { config, router }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &ChatConfig {
        &self.inner.config
    }

    /// Get the query router
    pub fn router(&self) -> &ChatRouter {
        &self.inner.router
    }
}
