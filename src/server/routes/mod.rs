//! API routes for the chat server

pub mod chat;

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat::chat))
        .route("/info", get(info))
}

/// API info endpoint
async fn info(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "index-chat",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Retrieval-augmented chat over paired search indexes",
        "chat_deployment": state.config().openai.chat_deployment,
        "index_namespace": state.config().search.index_namespace,
        "endpoints": {
            "POST /api/chat": "Answer a query with retrieved document context",
            "GET /api/info": "Service metadata"
        }
    }))
}
