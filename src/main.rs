use std::sync::Arc;

use healthchat::channels::{Channel, CliChannel};
use healthchat::config::ChatConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so chat output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = ChatConfig::from_env()?;

    eprintln!("🩺 HealthChat v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Reply delay: {}ms", config.reply_delay.as_millis());
    match config.profile_path {
        Some(ref path) => eprintln!("   Profile: {}", path.display()),
        None => eprintln!("   Profile: interactive onboarding"),
    }
    eprintln!("   Type /help for commands, /quit to exit.\n");

    let channel: Arc<dyn Channel> = Arc::new(CliChannel::new());
    healthchat::session::run(channel, config).await?;

    Ok(())
}
