//! Routing of component interactions to browser sessions.

use tracing::{debug, error};
use twilight_http::Client;
use twilight_model::{
    application::interaction::InteractionData, gateway::payload::incoming::InteractionCreate,
};

use super::respond::{
    acknowledge_silently, respond_ephemeral_message, respond_update_message, respond_wrong_user,
};
use super::session::{InteractionOutcome, SessionRegistry};
use super::token::parse_custom_id;
use super::view::build_browser_message;

/// Handle a browser control press.
///
/// Returns `Ok(false)` when the interaction is not a browser control.
pub async fn handle_browser_interaction(
    http: &Client,
    registry: &SessionRegistry,
    interaction: &InteractionCreate,
) -> anyhow::Result<bool> {
    let Some(InteractionData::MessageComponent(component_data)) = interaction.data.as_ref() else {
        return Ok(false);
    };

    let Some(token) = parse_custom_id(&component_data.custom_id) else {
        return Ok(false);
    };

    let Some(actor_user_id) = interaction.author_id().map(|id| id.get()) else {
        respond_ephemeral_message(http, interaction, "Unable to determine interaction user.")
            .await?;
        return Ok(true);
    };

    let outcome = registry
        .interact(token.session_id, actor_user_id, token.control.into())
        .await;

    match outcome {
        InteractionOutcome::Rerender(view) => {
            let (embeds, components) = build_browser_message(token.session_id, &view)?;
            respond_update_message(http, interaction, &embeds, &components).await?;
        }
        InteractionOutcome::Finished { view, followup } => {
            let (embeds, components) = build_browser_message(token.session_id, &view)?;
            respond_update_message(http, interaction, &embeds, &components).await?;

            if let Some(followup) = followup
                && let Err(source) = followup.await
            {
                error!(?source, session_id = token.session_id, "selection follow-up failed");
            }
        }
        InteractionOutcome::WrongUser => {
            respond_wrong_user(http, interaction).await?;
        }
        InteractionOutcome::Stale | InteractionOutcome::Ignored => {
            debug!(session_id = token.session_id, "acknowledging inert interaction");
            acknowledge_silently(http, interaction).await?;
        }
    }

    Ok(true)
}
