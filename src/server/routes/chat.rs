//! Chat endpoint

use axum::{extract::State, Json};
use std::time::Instant;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{ChatRequest, ChatResponse};

/// POST /api/chat - answer a query with retrieved document context
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let start = Instant::now();

    tracing::info!("Chat query: \"{}\"", request.message);

    let reply = state
        .router()
        .respond(&request.message, &request.history)
        .await?;

    tracing::info!(
        "Chat completed in {}ms ({} history turns)",
        start.elapsed().as_millis(),
        request.history.len()
    );

    Ok(Json(ChatResponse { reply }))
}
