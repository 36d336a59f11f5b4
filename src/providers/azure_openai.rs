//! Azure OpenAI chat-completions client
//!
//! Implements both the structured title extraction call (a tool-constrained
//! completion) and plain answer generation against the same deployment.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::OpenAiConfig;
use crate::error::{Error, Result};
use crate::types::{ChatMessage, TitleExtraction};

use super::completion::{ChatCompleter, TitleExtractor};

/// Azure OpenAI client for a single chat deployment
pub struct AzureOpenAiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    api_version: String,
    deployment: String,
}

impl AzureOpenAiClient {
    /// Create a new client sharing an existing HTTP client handle
    pub fn new(config: &OpenAiConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone(),
            deployment: config.chat_deployment.clone(),
        }
    }

    /// Chat completions URL for the configured deployment
    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }

    /// Issue one completion request and return the first choice's message
    async fn send(&self, request: &CompletionRequest<'_>) -> Result<ChoiceMessage> {
        let response = self
            .http
            .post(self.completions_url())
            .header("api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Completion(format!("Completion request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Completion(format!(
                "Completion request failed ({}): {}",
                status, body
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Completion(format!("Failed to parse completion response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| Error::Completion("No choices in completion response".to_string()))
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ToolDefinition>>,
}

#[derive(Serialize)]
struct ToolDefinition {
    #[serde(rename = "type")]
    kind: &'static str,
    function: FunctionDefinition,
}

#[derive(Serialize)]
struct FunctionDefinition {
    name: &'static str,
    description: &'static str,
    parameters: serde_json::Value,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[derive(Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Deserialize)]
struct FunctionCall {
    arguments: String,
}

/// Expected shape of the extraction tool arguments
///
/// The model may return `"titles": null`; that coalesces to an empty list,
/// matching the behavior of an explicit empty array.
#[derive(Debug, Deserialize)]
struct ExtractedTitles {
    titles: Option<Vec<String>>,
}

/// Tool definition constraining the extraction call to the titles schema
fn extract_titles_tool() -> ToolDefinition {
    ToolDefinition {
        kind: "function",
        function: FunctionDefinition {
            name: "extract_titles",
            description: "Extracts titles from a query to use in a search filter.",
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "titles": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "List of titles extracted from the query. \
                            Complete file names are considered titles. If there \
                            are no titles in the query, provide an empty list."
                    }
                },
                "required": ["titles"]
            }),
        },
    }
}

/// Validate tool-call arguments against the titles schema
fn parse_title_arguments(arguments: &str) -> TitleExtraction {
    match serde_json::from_str::<ExtractedTitles>(arguments) {
        Ok(extracted) => TitleExtraction::Titles(extracted.titles.unwrap_or_default()),
        Err(_) => TitleExtraction::Unparsed,
    }
}

#[async_trait]
impl TitleExtractor for AzureOpenAiClient {
    async fn extract_titles(&self, query: &str) -> Result<TitleExtraction> {
        let messages = vec![
            ChatMessage::system("You are a helpful assistant that extracts titles from user queries."),
            ChatMessage::user(format!(
                "Extract the titles from the following query: '{}'",
                query
            )),
        ];

        let request = CompletionRequest {
            messages: &messages,
            tools: Some(vec![extract_titles_tool()]),
        };

        let message = self.send(&request).await?;

        let Some(call) = message.tool_calls.into_iter().next() else {
            return Ok(TitleExtraction::Unparsed);
        };

        Ok(parse_title_arguments(&call.function.arguments))
    }
}

#[async_trait]
impl ChatCompleter for AzureOpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let request = CompletionRequest {
            messages,
            tools: None,
        };

        let message = self.send(&request).await?;

        message
            .content
            .ok_or_else(|| Error::Completion("Completion reply had no content".to_string()))
    }

    fn name(&self) -> &str {
        "azure-openai"
    }

    fn model(&self) -> &str {
        &self.deployment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_arguments_yield_titles() {
        let extraction = parse_title_arguments(r#"{"titles": ["myreport.pdf", "notes.docx"]}"#);
        assert_eq!(
            extraction,
            TitleExtraction::Titles(vec![
                "myreport.pdf".to_string(),
                "notes.docx".to_string()
            ])
        );
    }

    #[test]
    fn null_titles_coalesce_to_empty() {
        let extraction = parse_title_arguments(r#"{"titles": null}"#);
        assert_eq!(extraction, TitleExtraction::Titles(Vec::new()));
    }

    #[test]
    fn empty_list_is_valid() {
        let extraction = parse_title_arguments(r#"{"titles": []}"#);
        assert_eq!(extraction, TitleExtraction::Titles(Vec::new()));
    }

    #[test]
    fn malformed_arguments_are_unparsed() {
        assert_eq!(parse_title_arguments("not json"), TitleExtraction::Unparsed);
        assert_eq!(
            parse_title_arguments(r#"{"titles": "myreport.pdf"}"#),
            TitleExtraction::Unparsed
        );
        assert_eq!(
            parse_title_arguments(r#"{"titles": [1, 2]}"#),
            TitleExtraction::Unparsed
        );
    }

    #[test]
    fn completions_url_includes_deployment_and_version() {
        let config = OpenAiConfig {
            endpoint: "https://example.openai.azure.com/".to_string(),
            api_key: "key".to_string(),
            api_version: "2024-08-01-preview".to_string(),
            chat_deployment: "gpt-4o".to_string(),
            ..Default::default()
        };
        let client = AzureOpenAiClient::new(&config, reqwest::Client::new());
        assert_eq!(
            client.completions_url(),
            "https://example.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-08-01-preview"
        );
    }
}
