use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::media::embeds::{
    empty_list_embed, report_anilist_failure, send_embed, unknown_user_embed, usage_message,
};
use crate::media::render::favourite_line;
use kyun_anilist::MediaKind;
use kyun_core::Context;
use kyun_utils::pagination::{
    BrowserError, Navigator, chunk_entries, list_page_template, send_browser_message,
};

pub const META: CommandMeta = CommandMeta {
    name: "favs",
    desc: "Browse an AniList user's favourite anime or manga.",
    category: "media",
    usage: "!favs <anime|manga> <anilist-user>",
};

fn title_for(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Anime => "Favourite Anime",
        MediaKind::Manga => "Favourite Manga",
    }
}

/// Browse the favourites of an AniList user.
pub async fn run(
    ctx: Context,
    msg: Box<MessageCreate>,
    arg1: Option<&str>,
    arg_tail: Option<&str>,
) -> anyhow::Result<()> {
    let http = &ctx.http;
    let parsed_kind = arg1.and_then(|raw| raw.parse::<MediaKind>().ok());
    let (Some(kind), Some(user_name)) = (parsed_kind, arg_tail) else {
        http.create_message(msg.channel_id)
            .content(&usage_message(META.usage))
            .await?;
        return Ok(());
    };

    let user_id = match ctx.anilist.user_id_by_name(user_name).await {
        Ok(Some(user_id)) => user_id,
        Ok(None) => return send_embed(&ctx, msg.channel_id, unknown_user_embed(user_name)?).await,
        Err(source) => return report_anilist_failure(&ctx, msg.channel_id, source).await,
    };

    let favourites = match ctx.anilist.favourites(user_id, kind).await {
        Ok(favourites) => favourites,
        Err(source) => return report_anilist_failure(&ctx, msg.channel_id, source).await,
    };

    let lines: Vec<String> = favourites.iter().map(favourite_line).collect();
    let pages = chunk_entries(
        &lines,
        ctx.config.page_capacity,
        list_page_template(title_for(kind)),
    );

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
            let what = format!("their favourite {}", kind.noun());
            send_embed(&ctx, msg.channel_id, empty_list_embed(user_name, &what)?).await?;
        }
    }

    Ok(())
}
