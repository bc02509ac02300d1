use std::sync::Arc;

use smart_assist::config::ClientConfig;
use smart_assist::dispatch::Assistant;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout is the conversation.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = ClientConfig::from_env()?;
    let assistant = Arc::new(Assistant::from_config(&config)?);

    eprintln!("🤖 Smart Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Backend: {}", config.base_url);
    match config.request_timeout {
        Some(timeout) => eprintln!("   Request timeout: {}s", timeout.as_secs()),
        None => eprintln!("   Request timeout: none"),
    }

    match assistant.health_check().await {
        Ok(message) => eprintln!("   Backend says: {}", message),
        Err(e) => {
            tracing::warn!(reason = %e.reason, "Backend health check failed");
            eprintln!("   Warning: backend not reachable yet; requests will report errors");
        }
    }
    eprintln!("   Type a message and press Enter. /help for commands, /quit to exit.\n");

    tracing::info!(
        session_id = %assistant.conversation().session_id(),
        "Session started"
    );

    smart_assist::cli::run(assistant).await
}
