use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use kyun_core::Context;

pub const META: CommandMeta = CommandMeta {
    name: "ping",
    desc: "Replies with Pong! and the number of open menus.",
    category: "utility",
    usage: "!ping",
};

/// Send a connectivity response with the live browser count.
pub async fn run(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    let open = ctx.sessions.len().await;
    let out = match open {
        1 => "Pong! 1 menu is open.".to_owned(),
        count => format!("Pong! {count} menus are open."),
    };

    ctx.http.create_message(msg.channel_id).content(&out).await?;

    Ok(())
}
