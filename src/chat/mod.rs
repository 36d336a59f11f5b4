//! Query routing, context assembly, and prompt construction

pub mod prompt;
pub mod router;

pub use router::ChatRouter;
