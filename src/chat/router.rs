//! Query routing and context assembly
//!
//! The router decides between the title-filtered parent-index lookup and the
//! vector/semantic child-index lookup, builds the completion payload, and
//! appends the citation suffix. It holds only shared client handles; each
//! call is stateless apart from the caller-supplied history.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::{ChatCompleter, DocumentIndex, TitleExtractor};
use crate::types::{ChatMessage, TitleExtraction};

use super::prompt;

/// Query router and context assembler
pub struct ChatRouter {
    extractor: Arc<dyn TitleExtractor>,
    index: Arc<dyn DocumentIndex>,
    completer: Arc<dyn ChatCompleter>,
}

impl ChatRouter {
    /// Create a router over injected provider handles
    pub fn new(
        extractor: Arc<dyn TitleExtractor>,
        index: Arc<dyn DocumentIndex>,
        completer: Arc<dyn ChatCompleter>,
    ) -> Self {
        Self {
            extractor,
            index,
            completer,
        }
    }

    /// Retrieve context for a query, preferring exact title matches
    ///
    /// Filtered results take exclusive precedence: the similarity lookup runs
    /// only when no titles were extracted or the filtered lookup matched
    /// nothing.
    pub async fn assemble_context(&self, query: &str, titles: &[String]) -> Result<String> {
        if !titles.is_empty() {
            let documents = self.index.lookup_by_titles(titles).await?;
            if !documents.is_empty() {
                tracing::debug!(hits = documents.len(), "using filtered lookup results");
                return Ok(prompt::format_context(&documents));
            }
            tracing::debug!("filtered lookup matched nothing, falling back to similarity");
        }

        let documents = self.index.similarity_search(query).await?;
        Ok(prompt::format_context(&documents))
    }

    /// Answer a query against retrieved context and prior history
    pub async fn respond(&self, query: &str, history: &[ChatMessage]) -> Result<String> {
        let titles = match self.extractor.extract_titles(query).await? {
            TitleExtraction::Titles(titles) => titles,
            TitleExtraction::Unparsed => {
                tracing::debug!("title extraction did not validate, treating as no titles");
                Vec::new()
            }
        };
        tracing::info!(titles = titles.len(), "routing query");

        let context = self.assemble_context(query, &titles).await?;
        let messages = prompt::build_messages(query, &context, history);

        let mut reply = self.completer.complete(&messages).await?;
        if !titles.is_empty() {
            reply.push_str(&prompt::citation_suffix(&titles));
        }

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RetrievedDocument, Role};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StubExtractor(TitleExtraction);

    #[async_trait]
    impl TitleExtractor for StubExtractor {
        async fn extract_titles(&self, _query: &str) -> Result<TitleExtraction> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct StubIndex {
        filtered: Vec<RetrievedDocument>,
        similar: Vec<RetrievedDocument>,
        filtered_calls: AtomicUsize,
        similarity_calls: AtomicUsize,
        last_similarity_query: Mutex<Option<String>>,
    }

    #[async_trait]
    impl DocumentIndex for StubIndex {
        async fn lookup_by_titles(&self, _titles: &[String]) -> Result<Vec<RetrievedDocument>> {
            self.filtered_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.filtered.clone())
        }

        async fn similarity_search(&self, query: &str) -> Result<Vec<RetrievedDocument>> {
            self.similarity_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_similarity_query.lock().unwrap() = Some(query.to_string());
            Ok(self.similar.clone())
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    #[derive(Default)]
    struct RecordingCompleter {
        reply: String,
        last_messages: Mutex<Vec<ChatMessage>>,
    }

    impl RecordingCompleter {
        fn replying(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl ChatCompleter for RecordingCompleter {
        async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
            *self.last_messages.lock().unwrap() = messages.to_vec();
            Ok(self.reply.clone())
        }

        fn name(&self) -> &str {
            "stub"
        }

        fn model(&self) -> &str {
            "stub"
        }
    }

    fn router_with(
        extraction: TitleExtraction,
        index: Arc<StubIndex>,
        completer: Arc<RecordingCompleter>,
    ) -> ChatRouter {
        ChatRouter::new(Arc::new(StubExtractor(extraction)), index, completer)
    }

    #[tokio::test]
    async fn no_titles_routes_to_similarity_only() {
        let index = Arc::new(StubIndex {
            similar: vec![RetrievedDocument::new("handbook.pdf", "Vacation accrues monthly.")],
            ..Default::default()
        });
        let completer = Arc::new(RecordingCompleter::replying("You accrue monthly."));
        let router = router_with(
            TitleExtraction::Titles(Vec::new()),
            index.clone(),
            completer.clone(),
        );

        let reply = router
            .respond("What is our vacation policy?", &[])
            .await
            .unwrap();

        assert_eq!(index.filtered_calls.load(Ordering::SeqCst), 0);
        assert_eq!(index.similarity_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            index.last_similarity_query.lock().unwrap().as_deref(),
            Some("What is our vacation policy?")
        );
        // No citation suffix without extracted titles
        assert_eq!(reply, "You accrue monthly.");
    }

    #[tokio::test]
    async fn filtered_hit_skips_similarity() {
        let index = Arc::new(StubIndex {
            filtered: vec![RetrievedDocument::new("myreport.pdf", "Q3 sales rose 10%.")],
            ..Default::default()
        });
        let completer = Arc::new(RecordingCompleter::replying("Sales rose 10%."));
        let router = router_with(
            TitleExtraction::Titles(vec!["myreport.pdf".to_string()]),
            index.clone(),
            completer.clone(),
        );

        let reply = router
            .respond("Find the report on sales using 'myreport.pdf'", &[])
            .await
            .unwrap();

        assert_eq!(index.filtered_calls.load(Ordering::SeqCst), 1);
        assert_eq!(index.similarity_calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            reply,
            "Sales rose 10%.\nTitles used for the answer: myreport.pdf"
        );

        // The filtered context reached the completion call
        let messages = completer.last_messages.lock().unwrap();
        assert!(messages
            .last()
            .unwrap()
            .content
            .contains("Relevant documents: myreport.pdf\nQ3 sales rose 10%."));
    }

    #[tokio::test]
    async fn filtered_miss_falls_back_to_similarity() {
        let index = Arc::new(StubIndex {
            similar: vec![RetrievedDocument::new("other.pdf", "chunk text")],
            ..Default::default()
        });
        let completer = Arc::new(RecordingCompleter::replying("From the chunk."));
        let router = router_with(
            TitleExtraction::Titles(vec!["missing.pdf".to_string()]),
            index.clone(),
            completer,
        );

        let reply = router.respond("where is it?", &[]).await.unwrap();

        assert_eq!(index.filtered_calls.load(Ordering::SeqCst), 1);
        assert_eq!(index.similarity_calls.load(Ordering::SeqCst), 1);
        // Suffix still present: titles were extracted, whichever path supplied context
        assert_eq!(
            reply,
            "From the chunk.\nTitles used for the answer: missing.pdf"
        );
    }

    #[tokio::test]
    async fn unparsed_extraction_degrades_to_similarity() {
        let index = Arc::new(StubIndex::default());
        let completer = Arc::new(RecordingCompleter::replying("I don't know"));
        let router = router_with(TitleExtraction::Unparsed, index.clone(), completer);

        let reply = router.respond("anything", &[]).await.unwrap();

        assert_eq!(index.filtered_calls.load(Ordering::SeqCst), 0);
        assert_eq!(index.similarity_calls.load(Ordering::SeqCst), 1);
        assert_eq!(reply, "I don't know");
    }

    #[tokio::test]
    async fn assemble_context_is_idempotent() {
        let index = Arc::new(StubIndex {
            filtered: vec![
                RetrievedDocument::new("a.pdf", "alpha"),
                RetrievedDocument::new("b.pdf", "beta"),
            ],
            ..Default::default()
        });
        let completer = Arc::new(RecordingCompleter::default());
        let router = router_with(
            TitleExtraction::Titles(Vec::new()),
            index.clone(),
            completer,
        );

        let titles = vec!["a.pdf".to_string(), "b.pdf".to_string()];
        let first = router.assemble_context("query", &titles).await.unwrap();
        let second = router.assemble_context("query", &titles).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, "a.pdf\nalpha\nb.pdf\nbeta");
    }

    #[tokio::test]
    async fn ongoing_conversation_appends_to_history() {
        let index = Arc::new(StubIndex::default());
        let completer = Arc::new(RecordingCompleter::replying("answer"));
        let router = router_with(
            TitleExtraction::Titles(Vec::new()),
            index,
            completer.clone(),
        );

        let history = vec![
            ChatMessage::user("first question"),
            ChatMessage::assistant("first answer"),
        ];
        router.respond("second question", &history).await.unwrap();

        let messages = completer.last_messages.lock().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], history[0]);
        assert_eq!(messages[1], history[1]);
        assert_eq!(messages[2].role, Role::User);
        // No system turn injected mid-conversation
        assert!(messages.iter().all(|m| m.role != Role::System));
    }

    #[tokio::test]
    async fn new_conversation_starts_with_system_turn() {
        let index = Arc::new(StubIndex::default());
        let completer = Arc::new(RecordingCompleter::replying("answer"));
        let router = router_with(TitleExtraction::Titles(Vec::new()), index, completer.clone());

        router.respond("first question", &[]).await.unwrap();

        let messages = completer.last_messages.lock().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
    }
}
