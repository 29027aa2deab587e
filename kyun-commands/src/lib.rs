pub mod media;
pub mod utility;

use tracing::debug;
use twilight_model::{
    application::interaction::InteractionData,
    gateway::payload::incoming::{InteractionCreate, MessageCreate},
};

use kyun_core::Context;
use kyun_utils::cooldown::format_wait;
use kyun_utils::pagination::{handle_browser_interaction, is_browser_custom_id};
use kyun_utils::parse::{split_command, split_first_arg};

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    media::search::META,
    media::list::META,
    media::favourites::META,
    // Add new commands here
];

/// Canonical command name for `cmd`, `None` when it is not a command.
pub fn resolve_command(cmd: &str) -> Option<&'static str> {
    let name = match cmd {
        "favourites" => "favs",
        other => other,
    };
    COMMANDS.iter().find(|meta| meta.name == name).map(|meta| meta.name)
}

/// Reply sent to a user who is still on cooldown.
pub fn cooldown_message(remaining: std::time::Duration) -> String {
    format!("Slow down! Try again in {}.", format_wait(remaining))
}

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let content = msg.content.clone();
    let Some((cmd, rest)) = split_command(&content, &ctx.config.command_prefix) else {
        return Ok(());
    };
    let Some(command) = resolve_command(&cmd) else {
        return Ok(());
    };
    let (arg1, arg_tail) = split_first_arg(rest);

    if let Err(remaining) = ctx.cooldowns.try_acquire(msg.author.id.get()).await {
        debug!(command, author = msg.author.id.get(), "command on cooldown");
        ctx.http
            .create_message(msg.channel_id)
            .content(&cooldown_message(remaining))
            .await?;
        return Ok(());
    }

    debug!(command, author = msg.author.id.get(), "dispatching command");

    match command {
        "ping" => utility::ping::run(ctx.clone(), msg).await?,
        "help" => utility::help::run(ctx.clone(), msg, arg1).await?,

        "search" => media::search::run(ctx.clone(), msg, arg1, arg_tail).await?,
        "list" => media::list::run(ctx.clone(), msg, arg1, arg_tail).await?,
        "favs" => media::favourites::run(ctx.clone(), msg, arg1, arg_tail).await?,
        // Add new commands here
        _ => {}
    }

    Ok(())
}

pub async fn handle_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<()> {
    let Some(InteractionData::MessageComponent(data)) = interaction.data.as_ref() else {
        return Ok(());
    };

    if !is_browser_custom_id(&data.custom_id) {
        return Ok(());
    }

    let handled = handle_browser_interaction(&ctx.http, &ctx.sessions, &interaction).await?;
    if !handled {
        debug!(custom_id = %data.custom_id, "unhandled browser interaction");
    }

    Ok(())
}
