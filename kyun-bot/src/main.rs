use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;

use kyun_anilist::AniListClient;
use kyun_commands::{handle_interaction, handle_message};
use kyun_core::{BotConfig, Context};
use kyun_utils::pagination::{SessionRegistry, run_expiry_listener};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();
    let config = Arc::new(BotConfig::from_env()?);

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(config.discord_token.clone()));
    let anilist = AniListClient::new(config.anilist_url.clone());

    // Expired menus are frozen by a dedicated task
    let (sessions, expired_rx) = SessionRegistry::new(config.session_timeout);
    tokio::spawn(run_expiry_listener(Arc::clone(&http), expired_rx));

    let ctx = Context::new(Arc::clone(&http), sessions, anilist, Arc::clone(&config));

    let intents = Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT;
    let mut shard = Shard::new(ShardId::new(0, 1), config.discord_token.clone(), intents);

    info!(
        timeout_secs = config.session_timeout.as_secs(),
        page_capacity = config.page_capacity,
        "Kyun is connecting..."
    );

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        match event {
            Event::Ready(_) => {
                info!("Kyun has successfully awoken!");
            }
            Event::MessageCreate(msg) => {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    if let Err(source) = handle_message(ctx, msg).await {
                        error!(?source, "message handler failed");
                    }
                });
            }
            Event::InteractionCreate(interaction) => {
                if let Err(source) = handle_interaction(ctx.clone(), interaction).await {
                    error!(?source, "interaction handler failed");
                }
            }
            _ => {} // Ignore unused events
        }
    }

    Ok(())
}
