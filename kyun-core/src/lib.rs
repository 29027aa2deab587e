use std::sync::Arc;

use twilight_http::Client;

use kyun_anilist::AniListClient;
use kyun_utils::cooldown::Cooldowns;
use kyun_utils::pagination::SessionRegistry;

/// Environment-driven bot configuration.
pub mod config;

pub use config::{BotConfig, ConfigError};

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub sessions: SessionRegistry,
    pub anilist: AniListClient,
    pub config: Arc<BotConfig>,
    pub cooldowns: Cooldowns,
}

impl Context {
    /// Create a new application context.
    pub fn new(
        http: Arc<Client>,
        sessions: SessionRegistry,
        anilist: AniListClient,
        config: Arc<BotConfig>,
    ) -> Self {
        let cooldowns = Cooldowns::new(config.command_cooldown);
        Self {
            http,
            sessions,
            anilist,
            config,
            cooldowns,
        }
    }
}
