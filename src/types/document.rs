//! Retrieved documents and the title extraction outcome

use serde::{Deserialize, Serialize};

/// A document returned by either lookup path
///
/// The parent index returns full `content`, the child index returns a `chunk`;
/// both are normalized to the single `body` field here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub title: String,
    pub body: String,
}

impl RetrievedDocument {
    /// Create a retrieved document
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Outcome of the structured title extraction call
///
/// A payload that fails to validate against the titles schema is a distinct
/// outcome rather than a swallowed error; the router decides to treat it as
/// "no titles" and fall through to the similarity lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleExtraction {
    /// Arguments validated; the list may be empty
    Titles(Vec<String>),
    /// No tool call returned, or arguments failed schema validation
    Unparsed,
}

impl TitleExtraction {
    /// Titles to route on; an unparsed payload degrades to none
    pub fn into_titles(self) -> Vec<String> {
        match self {
            Self::Titles(titles) => titles,
            Self::Unparsed => Vec::new(),
        }
    }
}
