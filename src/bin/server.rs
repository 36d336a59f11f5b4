//! Chat server binary
//!
//! Run with: cargo run --bin index-chat-server

use index_chat::{config::ChatConfig, server::ChatServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pull collaborator endpoints and keys from .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "index_chat=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = ChatConfig::from_env()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Chat deployment: {}", config.openai.chat_deployment);
    tracing::info!("  - Search endpoint: {}", config.search.endpoint);
    tracing::info!("  - Parent index: {}", config.search.parent_index());
    tracing::info!("  - Child index: {}", config.search.child_index());

    // Create and start server
    let server = ChatServer::new(config)?;

    println!("\nServer starting...");
    println!("  Chat UI: http://{}/", server.address());
    println!("  Health:  http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/chat - Ask questions over indexed documents");
    println!("  GET  /api/info - Service metadata");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
