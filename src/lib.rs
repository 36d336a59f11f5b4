//! index-chat: retrieval-augmented chat over paired search indexes
//!
//! Each user query is routed between an exact title-filtered lookup against a
//! parent index and a vector/semantic similarity lookup against a child index.
//! The retrieved context and the conversation history are then forwarded to a
//! chat-completion deployment for the final answer, with a citation line
//! listing the titles that drove the retrieval.

pub mod chat;
pub mod config;
pub mod error;
pub mod providers;
pub mod server;
pub mod types;

pub use chat::ChatRouter;
pub use config::ChatConfig;
pub use error::{Error, Result};
pub use types::{
    document::{RetrievedDocument, TitleExtraction},
    message::{ChatMessage, ChatRequest, ChatResponse, Role},
};
