use tracing::warn;
use twilight_model::{channel::message::embed::Embed, id::Id, id::marker::ChannelMarker};

use kyun_anilist::{AniListError, MediaKind, MediaListStatus};
use kyun_core::Context;
use kyun_utils::embed::build_error_embed;

pub fn usage_message(usage: &str) -> String {
    format!("Usage: `{usage}`")
}

pub fn unknown_status_message(raw: &str) -> String {
    let aliases = MediaListStatus::ALIASES
        .iter()
        .map(|(alias, _)| format!("`{alias}`"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Unknown list `{raw}`. Try one of: {aliases}")
}

pub fn unknown_user_embed(name: &str) -> anyhow::Result<Embed> {
    build_error_embed("Who?", format!("No AniList user is called `{name}`."))
}

pub fn nothing_found_embed(kind: MediaKind) -> anyhow::Result<Embed> {
    build_error_embed(
        "Damn",
        format!("No {} were found for that input.", kind.noun()),
    )
}

pub fn empty_list_embed(name: &str, what: &str) -> anyhow::Result<Embed> {
    build_error_embed("Nothing here", format!("`{name}` has nothing in {what}."))
}

pub fn anilist_failure_embed(source: &AniListError) -> anyhow::Result<Embed> {
    build_error_embed(
        "Whoops",
        format!("The following error occurred : ```{source}```"),
    )
}

/// Send a single embed to a channel.
pub async fn send_embed(
    ctx: &Context,
    channel_id: Id<ChannelMarker>,
    embed: Embed,
) -> anyhow::Result<()> {
    ctx.http.create_message(channel_id).embeds(&[embed]).await?;
    Ok(())
}

/// Report an AniList failure in the channel instead of failing the handler.
pub async fn report_anilist_failure(
    ctx: &Context,
    channel_id: Id<ChannelMarker>,
    source: AniListError,
) -> anyhow::Result<()> {
    warn!(?source, "AniList request failed");
    send_embed(ctx, channel_id, anilist_failure_embed(&source)?).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_lists_aliases() {
        let message = unknown_status_message("fav");
        assert!(message.starts_with("Unknown list `fav`."));
        assert!(message.contains("`ptw`"));
        assert!(message.contains("`dropped`"));
    }

    #[test]
    fn nothing_found_names_the_media_kind() {
        let embed = nothing_found_embed(MediaKind::Manga).expect("valid embed");
        assert_eq!(
            embed.description.as_deref(),
            Some("No manga were found for that input.")
        );
    }
}
