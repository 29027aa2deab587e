//! Discord response helpers for browser messages.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info, warn};
use twilight_http::Client;
use twilight_model::{
    channel::message::{MessageFlags, component::Component, embed::Embed},
    gateway::payload::incoming::InteractionCreate,
    http::interaction::{InteractionResponse, InteractionResponseType},
    id::{
        Id,
        marker::{ChannelMarker, MessageMarker},
    },
};
use twilight_util::builder::InteractionResponseDataBuilder;

use super::session::{MessageRef, SessionExpired, SessionRegistry};
use super::token::SessionId;
use super::view::{Browser, build_browser_message};

/// Notice shown when someone presses another user's browser controls.
pub const BROWSER_WRONG_USER_MESSAGE: &str = "This menu belongs to someone else. Run the command yourself to browse.";

/// Respond to a component interaction with an in-place message update.
pub async fn respond_update_message(
    http: &Client,
    interaction: &InteractionCreate,
    embeds: &[Embed],
    components: &[Component],
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::UpdateMessage,
        data: Some(
            InteractionResponseDataBuilder::new()
                .embeds(embeds.to_vec())
                .components(components.to_vec())
                .build(),
        ),
    };

    http.interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, &response)
        .await?;

    Ok(())
}

/// Respond to a component interaction with an ephemeral message.
pub async fn respond_ephemeral_message(
    http: &Client,
    interaction: &InteractionCreate,
    content: &str,
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(
            InteractionResponseDataBuilder::new()
                .content(content)
                .flags(MessageFlags::EPHEMERAL)
                .build(),
        ),
    };

    http.interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, &response)
        .await?;

    Ok(())
}

/// Respond with the standard wrong-owner notice.
pub async fn respond_wrong_user(
    http: &Client,
    interaction: &InteractionCreate,
) -> anyhow::Result<()> {
    respond_ephemeral_message(http, interaction, BROWSER_WRONG_USER_MESSAGE).await
}

/// Acknowledge a component interaction without touching the message.
pub async fn acknowledge_silently(
    http: &Client,
    interaction: &InteractionCreate,
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::DeferredUpdateMessage,
        data: None,
    };

    http.interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, &response)
        .await?;

    Ok(())
}

/// Open a session for `owner`, post its first render and bind the message.
///
/// The session is cancelled if the message cannot be sent.
pub async fn send_browser_message(
    http: &Client,
    registry: &SessionRegistry,
    channel_id: Id<ChannelMarker>,
    owner: u64,
    browser: Box<dyn Browser>,
) -> anyhow::Result<SessionId> {
    let (session_id, view) = registry.open(owner, browser).await;

    let sent = async {
        let (embeds, components) = build_browser_message(session_id, &view)?;
        let message = http
            .create_message(channel_id)
            .embeds(&embeds)
            .components(&components)
            .await?
            .model()
            .await?;
        anyhow::Ok(message)
    }
    .await;

    let message = match sent {
        Ok(message) => message,
        Err(source) => {
            registry.cancel(session_id).await;
            return Err(source);
        }
    };

    let bound = registry
        .attach_message(
            session_id,
            MessageRef {
                channel_id: message.channel_id.get(),
                message_id: message.id.get(),
            },
        )
        .await;

    if !bound {
        // The expiry listener saw no message to freeze.
        warn!(session_id, "session ended before its message was bound");
        let (_, components) = build_browser_message(session_id, &view.frozen())?;
        http.update_message(message.channel_id, message.id)
            .components(Some(&components))
            .await?;
    }

    Ok(session_id)
}

/// Replace the controls of an expired session's message with their frozen form.
pub async fn freeze_expired_message(http: &Client, expired: &SessionExpired) -> anyhow::Result<()> {
    let Some(message) = expired.message else {
        return Ok(());
    };

    let (Some(channel_id), Some(message_id)) = (
        Id::<ChannelMarker>::new_checked(message.channel_id),
        Id::<MessageMarker>::new_checked(message.message_id),
    ) else {
        return Ok(());
    };

    let (_, components) = build_browser_message(expired.session_id, &expired.view)?;
    http.update_message(channel_id, message_id)
        .components(Some(&components))
        .await?;

    Ok(())
}

/// Freeze messages of expired sessions until the registry is dropped.
pub async fn run_expiry_listener(http: Arc<Client>, mut expired_rx: mpsc::UnboundedReceiver<SessionExpired>) {
    while let Some(expired) = expired_rx.recv().await {
        if let Err(source) = freeze_expired_message(&http, &expired).await {
            error!(?source, session_id = expired.session_id, "failed to freeze expired browser");
        }
    }

    info!("expiry listener stopped");
}
