//! Request-scoped types for messages and retrieved documents

pub mod document;
pub mod message;

pub use document::{RetrievedDocument, TitleExtraction};
pub use message::{ChatMessage, ChatRequest, ChatResponse, Role};
