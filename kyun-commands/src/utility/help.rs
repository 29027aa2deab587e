use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::{COMMANDS, CommandMeta};
use kyun_core::Context;
use kyun_utils::pagination::{
    BrowserError, Navigator, PageBody, chunk_entries, send_browser_message,
};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [category]",
};

const HELP_COMMANDS_PER_PAGE: usize = 8;

/// Browse the command catalog, optionally filtered by category.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let category = arg1.map(str::to_ascii_lowercase);

    let categories = command_categories();
    if let Some(wanted) = category.as_deref()
        && !categories.contains(&wanted)
    {
        let out = format!(
            "Unknown category `{wanted}`. Available: {}",
            categories.join(", ")
        );
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let lines = help_lines(&sorted_commands(category.as_deref()), &ctx.config.command_prefix);
    let pages = chunk_entries(&lines, HELP_COMMANDS_PER_PAGE, |total| {
        PageBody::new("Available Commands").description(format!("{total} commands\n\n"))
    });

    match Navigator::new(pages, false) {
        Ok(navigator) => {
            send_browser_message(
                http,
                &ctx.sessions,
                msg.channel_id,
                msg.author.id.get(),
                Box::new(navigator),
            )
            .await?;
        }
        Err(BrowserError::EmptyResult) => {
            http.create_message(msg.channel_id)
                .content("No commands available.")
                .await?;
        }
    }

    Ok(())
}

fn command_categories() -> Vec<&'static str> {
    let mut categories: Vec<&str> = COMMANDS.iter().map(|c| c.category).collect();
    categories.sort_unstable();
    categories.dedup();
    categories
}

/// Usage strings are written with `!`; show them with the configured prefix.
fn help_lines(commands: &[&CommandMeta], prefix: &str) -> Vec<String> {
    commands
        .iter()
        .map(|cmd| {
            let usage = cmd.usage.strip_prefix('!').unwrap_or(cmd.usage);
            format!("**{}** `{prefix}{usage}`\n{}", cmd.category, cmd.desc)
        })
        .collect()
}

fn sorted_commands(category: Option<&str>) -> Vec<&'static CommandMeta> {
    let mut filtered: Vec<&'static CommandMeta> = COMMANDS
        .iter()
        .filter(|cmd| match category {
            Some(wanted) => cmd.category == wanted,
            None => true,
        })
        .collect();

    filtered.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    filtered
}
