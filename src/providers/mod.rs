//! Provider abstractions for the completion and search collaborators
//!
//! The router depends only on these traits, so test doubles (or alternative
//! backends) can be substituted without touching the orchestration logic.

pub mod azure_openai;
pub mod azure_search;
pub mod completion;
pub mod index;

pub use azure_openai::AzureOpenAiClient;
pub use azure_search::AzureSearchClient;
pub use completion::{ChatCompleter, TitleExtractor};
pub use index::DocumentIndex;
