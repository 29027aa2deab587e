use std::sync::Arc;

use tracing::info;
use twilight_http::Client;
use twilight_model::{
    gateway::payload::incoming::MessageCreate,
    id::{Id, marker::ChannelMarker},
};

use crate::CommandMeta;
use crate::media::embeds::{
    nothing_found_embed, report_anilist_failure, send_embed, usage_message,
};
use crate::media::render::{media_card, search_candidate};
use kyun_anilist::{MediaKind, MediaSummary};
use kyun_core::Context;
use kyun_utils::embed::build_page_embed;
use kyun_utils::pagination::{
    BrowserError, Candidate, Continuation, Followup, SelectionBrowser, send_browser_message,
};

pub const META: CommandMeta = CommandMeta {
    name: "search",
    desc: "Search AniList and pick the matching title.",
    category: "media",
    usage: "!search <anime|manga> <name>",
};

/// Continuation that posts the chosen media's information card.
fn post_media_card(
    http: Arc<Client>,
    channel_id: Id<ChannelMarker>,
    kind: MediaKind,
    requested_by: String,
) -> Continuation<MediaSummary> {
    Box::new(move |candidate: Candidate<MediaSummary>| -> Followup {
        Box::pin(async move {
            info!(media_id = candidate.id, "search match selected");
            let card = media_card(&candidate.payload, kind, &requested_by);
            let embed = build_page_embed(&card, None)?;
            http.create_message(channel_id).embeds(&[embed]).await?;
            Ok(())
        })
    })
}

/// Search for media and let the requester pick one of the best matches.
///
/// Inputs:
/// - media kind and free-text name: `!search anime frieren`.
///
/// Error behavior:
/// - malformed input returns usage text.
/// - no matches returns a "nothing found" embed and no selection menu.
pub async fn run(
    ctx: Context,
    msg: Box<MessageCreate>,
    arg1: Option<&str>,
    arg_tail: Option<&str>,
) -> anyhow::Result<()> {
    let parsed_kind = arg1.and_then(|raw| raw.parse::<MediaKind>().ok());
    let (Some(kind), Some(name)) = (parsed_kind, arg_tail) else {
        ctx.http
            .create_message(msg.channel_id)
            .content(&usage_message(META.usage))
            .await?;
        return Ok(());
    };

    let matches = match ctx.anilist.search_media(name, kind).await {
        Ok(matches) => matches,
        Err(source) => return report_anilist_failure(&ctx, msg.channel_id, source).await,
    };

    let candidates = matches
        .into_iter()
        .map(|media| search_candidate(media, kind))
        .collect();

    let continuation = post_media_card(
        Arc::clone(&ctx.http),
        msg.channel_id,
        kind,
        msg.author.name.clone(),
    );

    match SelectionBrowser::new(candidates, continuation) {
        Ok(browser) => {
            send_browser_message(
                &ctx.http,
                &ctx.sessions,
                msg.channel_id,
                msg.author.id.get(),
                Box::new(browser),
            )
            .await?;
        }
        Err(BrowserError::EmptyResult) => {
            send_embed(&ctx, msg.channel_id, nothing_found_embed(kind)?).await?;
        }
    }

    Ok(())
}
