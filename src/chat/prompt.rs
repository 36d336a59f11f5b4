//! Prompt text and message construction for the answer-generation call

use crate::types::{ChatMessage, RetrievedDocument};

/// Behavioral instructions sent as the system turn of a new conversation
pub const ASSISTANT_SYSTEM_MESSAGE: &str = "You are a helpful assistant that answers queries. \
    You do not have access to the internet, but you can use documents in the chat history to \
    answer the question. If the documents do not contain the answer, say 'I don't know'. \
    You must cite your answer with the titles of the documents used. If you are unsure, \
    say 'I don't know'.";

/// Join retrieved documents into a single context block
///
/// Each document contributes a `title\nbody` pair; pairs are newline-joined.
/// No documents yields the empty string.
pub fn format_context(documents: &[RetrievedDocument]) -> String {
    documents
        .iter()
        .map(|doc| format!("{}\n{}", doc.title, doc.body))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the message sequence for the answer-generation call
///
/// An ongoing conversation gets one user turn appended to the caller's
/// history; a new conversation gets the fixed system turn first. The input
/// history is never mutated.
pub fn build_messages(
    query: &str,
    context: &str,
    history: &[ChatMessage],
) -> Vec<ChatMessage> {
    let user_turn = ChatMessage::user(format!(
        "Answer the following query: {}\nRelevant documents: {}",
        query, context
    ));

    if history.is_empty() {
        vec![ChatMessage::system(ASSISTANT_SYSTEM_MESSAGE), user_turn]
    } else {
        let mut messages = history.to_vec();
        messages.push(user_turn);
        messages
    }
}

/// Citation line appended to the reply when title-based retrieval was attempted
pub fn citation_suffix(titles: &[String]) -> String {
    format!("\nTitles used for the answer: {}", titles.join(", "))
}
