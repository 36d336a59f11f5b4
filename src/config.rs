//! Configuration for the chat service
//!
//! Everything is sourced from the environment (with `.env` support in the
//! binary). The search and completion services are external collaborators, so
//! the configuration surface here is endpoints, credentials, deployment
//! identifiers, and the index naming scheme.

use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{Error, Result};

/// Main chat service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Azure OpenAI configuration
    pub openai: OpenAiConfig,
    /// Azure AI Search configuration
    pub search: SearchConfig,
}

impl ChatConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            openai: OpenAiConfig::from_env()?,
            search: SearchConfig::from_env()?,
        })
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            host: env_or("CHAT_HOST", &defaults.host),
            port: env_or("CHAT_PORT", "8080")
                .parse()
                .map_err(|e| Error::Config(format!("Invalid CHAT_PORT: {}", e)))?,
        })
    }
}

/// Azure OpenAI configuration (completion collaborator)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Resource endpoint, e.g. https://my-resource.openai.azure.com
    pub endpoint: String,
    /// API key
    pub api_key: String,
    /// API version query parameter
    pub api_version: String,
    /// Chat completion deployment name
    pub chat_deployment: String,
    /// Embedding deployment name (used by the indexing pipeline, surfaced
    /// here because it is part of the collaborator configuration)
    pub embedding_deployment: String,
    /// Embedding dimensionality
    pub embedding_dimensions: usize,
}

impl OpenAiConfig {
    fn from_env() -> Result<Self> {
        Ok(Self {
            endpoint: require("AZURE_OPENAI_ENDPOINT")?,
            api_key: require("AZURE_OPENAI_KEY")?,
            api_version: require("AZURE_OPENAI_API_VERSION")?,
            chat_deployment: require("AZURE_OPENAI_CHAT_DEPLOYMENT")?,
            embedding_deployment: env_or(
                "AZURE_OPENAI_EMBEDDING_DEPLOYMENT",
                "text-embedding-3-large",
            ),
            embedding_dimensions: env_or("AZURE_OPENAI_EMBEDDING_DIMENSIONS", "3072")
                .parse()
                .map_err(|e| {
                    Error::Config(format!("Invalid AZURE_OPENAI_EMBEDDING_DIMENSIONS: {}", e))
                })?,
        })
    }
}

/// Azure AI Search configuration (document store collaborator)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Service endpoint, e.g. https://my-service.search.windows.net
    pub endpoint: String,
    /// Admin or query API key
    pub api_key: String,
    /// REST API version query parameter
    pub api_version: String,
    /// Index name prefix; the service queries `{namespace}-parent` and
    /// `{namespace}-child`
    pub index_namespace: String,
    /// Vector field name on the child index
    pub vector_field: String,
    /// Semantic ranking configuration name on the child index
    pub semantic_configuration: String,
    /// Nearest neighbors for the vector query
    pub k_nearest_neighbors: usize,
    /// Result cap for the similarity lookup
    pub similarity_top: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            api_version: "2024-07-01".to_string(),
            index_namespace: "index-and-chat".to_string(),
            vector_field: "vector".to_string(),
            semantic_configuration: "my-semantic-config".to_string(),
            k_nearest_neighbors: 50,
            similarity_top: 5,
        }
    }
}

impl SearchConfig {
    fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            endpoint: require("AZURE_SEARCH_SERVICE_ENDPOINT")?,
            api_key: require("AZURE_SEARCH_ADMIN_KEY")?,
            api_version: env_or("AZURE_SEARCH_API_VERSION", &defaults.api_version),
            index_namespace: env_or("AZURE_SEARCH_INDEX_NAMESPACE", &defaults.index_namespace),
            vector_field: env_or("AZURE_SEARCH_VECTOR_FIELD", &defaults.vector_field),
            semantic_configuration: env_or(
                "AZURE_SEARCH_SEMANTIC_CONFIGURATION",
                &defaults.semantic_configuration,
            ),
            k_nearest_neighbors: defaults.k_nearest_neighbors,
            similarity_top: defaults.similarity_top,
        })
    }

    /// Name of the parent index (full documents, title-filtered lookup)
    pub fn parent_index(&self) -> String {
        format!("{}-parent", self.index_namespace)
    }

    /// Name of the child index (chunks, vector/semantic lookup)
    pub fn child_index(&self) -> String {
        format!("{}-child", self.index_namespace)
    }
}

/// Read a required environment variable
fn require(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing required environment variable {}", name)))
}

/// Read an environment variable with a fallback
fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_names_derive_from_namespace() {
        let config = SearchConfig::default();
        assert_eq!(config.parent_index(), "index-and-chat-parent");
        assert_eq!(config.child_index(), "index-and-chat-child");
    }

    #[test]
    fn similarity_defaults_match_index_layout() {
        let config = SearchConfig::default();
        assert_eq!(config.k_nearest_neighbors, 50);
        assert_eq!(config.similarity_top, 5);
        assert_eq!(config.vector_field, "vector");
    }
}
