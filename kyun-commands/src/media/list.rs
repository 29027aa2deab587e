use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::media::embeds::{
    empty_list_embed, report_anilist_failure, send_embed, unknown_status_message,
    unknown_user_embed, usage_message,
};
use crate::media::render::list_entry_line;
use kyun_anilist::{MediaKind, MediaListStatus};
use kyun_core::Context;
use kyun_utils::pagination::{
    BrowserError, Navigator, chunk_entries, list_page_template, send_browser_message,
};
use kyun_utils::parse::split_first_arg;

pub const META: CommandMeta = CommandMeta {
    name: "list",
    desc: "Browse an AniList user's list by status.",
    category: "media",
    usage: "!list <status> <anilist-user> [anime|manga]",
};

/// Browse one status list of an AniList user.
///
/// Inputs:
/// - status alias (`ptw`, `current`, `comp`, `drp`, ...), AniList user name,
///   optional media kind defaulting to anime.
///
/// Error behavior:
/// - malformed input returns usage text.
/// - unknown users and empty lists return error embeds and no browser.
pub async fn run(
    ctx: Context,
    msg: Box<MessageCreate>,
    arg1: Option<&str>,
    arg_tail: Option<&str>,
) -> anyhow::Result<()> {
    let http = &ctx.http;
    let (user_name, kind_raw) = split_first_arg(arg_tail);

    let (Some(status_raw), Some(user_name)) = (arg1, user_name) else {
        http.create_message(msg.channel_id)
            .content(&usage_message(META.usage))
            .await?;
        return Ok(());
    };

    let Some(status) = MediaListStatus::from_alias(status_raw) else {
        http.create_message(msg.channel_id)
            .content(&unknown_status_message(status_raw))
            .await?;
        return Ok(());
    };

    let kind = match kind_raw.map(str::parse::<MediaKind>) {
        None => MediaKind::Anime,
        Some(Ok(kind)) => kind,
        Some(Err(_)) => {
            http.create_message(msg.channel_id)
                .content(&usage_message(META.usage))
                .await?;
            return Ok(());
        }
    };

    let user_id = match ctx.anilist.user_id_by_name(user_name).await {
        Ok(Some(user_id)) => user_id,
        Ok(None) => return send_embed(&ctx, msg.channel_id, unknown_user_embed(user_name)?).await,
        Err(source) => return report_anilist_failure(&ctx, msg.channel_id, source).await,
    };

    let list = match ctx.anilist.media_list(user_id, kind, status).await {
        Ok(list) => list,
        Err(source) => return report_anilist_failure(&ctx, msg.channel_id, source).await,
    };

    let (title, lines) = match list {
        Some(list) => (
            format!("{} list", list.name),
            list.entries
                .iter()
                .map(|entry| list_entry_line(entry, kind))
                .collect::<Vec<_>>(),
        ),
        None => (format!("{status} list"), Vec::new()),
    };

    let pages = chunk_entries(&lines, ctx.config.page_capacity, list_page_template(&title));

    match Navigator::new(pages, true) {
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
            let what = format!("their {} list", status.to_string().to_ascii_lowercase());
            send_embed(&ctx, msg.channel_id, empty_list_embed(user_name, &what)?).await?;
        }
    }

    Ok(())
}
