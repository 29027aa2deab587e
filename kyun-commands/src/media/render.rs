//! Text and page rendering for AniList data.

use kyun_anilist::{ListMedia, MediaKind, MediaListEntry, MediaSummary};
use kyun_utils::pagination::{Candidate, PageBody};

const BULLET: &str = "•";
const NO_GENRES: &str = "None listed";

/// Square brackets would end the markdown link text early.
fn link_text(title: &str) -> String {
    title.replace('[', "(").replace(']', ")")
}

fn linked_title(title: &str, url: Option<&str>) -> String {
    match url {
        Some(url) => format!("[{}]({url})", link_text(title)),
        None => link_text(title),
    }
}

fn count_or_unknown(count: Option<u32>) -> String {
    count.map_or_else(|| "?".to_owned(), |value| value.to_string())
}

fn unit_total(kind: MediaKind, episodes: Option<u32>, chapters: Option<u32>) -> Option<u32> {
    match kind {
        MediaKind::Anime => episodes,
        MediaKind::Manga => chapters,
    }
}

/// One list line: linked title with progress over total units.
pub fn list_entry_line(entry: &MediaListEntry, kind: MediaKind) -> String {
    let media = &entry.media;
    let total = unit_total(kind, media.episodes, media.chapters);

    format!(
        "{BULLET} {} {}/{}",
        linked_title(media.title.preferred(), media.site_url.as_deref()),
        entry.progress.unwrap_or(0),
        count_or_unknown(total),
    )
}

/// One favourites line: linked title only.
pub fn favourite_line(media: &ListMedia) -> String {
    format!(
        "{BULLET} {}",
        linked_title(media.title.preferred(), media.site_url.as_deref())
    )
}

fn genres_value(genres: &[String]) -> String {
    if genres.is_empty() {
        return NO_GENRES.to_owned();
    }

    genres
        .iter()
        .map(|genre| format!("{BULLET} **{genre}**"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn summary_lines(media: &MediaSummary, kind: MediaKind) -> Vec<String> {
    let mut lines = Vec::with_capacity(4);

    if let Some(format) = media.format.as_deref() {
        lines.push(format!("**Format** : {format}"));
    }

    let units = match kind {
        MediaKind::Anime => ("Episodes", media.episodes),
        MediaKind::Manga => ("Chapters", media.chapters),
    };
    lines.push(format!("**{}** : {}", units.0, count_or_unknown(units.1)));

    if let Some(status) = media.status.as_deref() {
        lines.push(format!("**Status** : {status}"));
    }

    if let Some(score) = media.average_score {
        lines.push(format!("**Score** : {score}%"));
    }

    lines
}

fn media_body(media: &MediaSummary, kind: MediaKind) -> PageBody {
    let mut body = PageBody::new(media.title.preferred())
        .description(summary_lines(media, kind).join("\n"))
        .field("Genres", genres_value(&media.genres), false);

    if let Some(url) = media.site_url.as_deref() {
        body = body.url(url);
    }

    if let Some(cover) = media.cover_image.as_ref().and_then(|cover| cover.medium.as_deref()) {
        body = body.thumbnail(cover);
    }

    body
}

/// Selection candidate for a search match.
pub fn search_candidate(media: MediaSummary, kind: MediaKind) -> Candidate<MediaSummary> {
    Candidate {
        id: media.id,
        preview: media_body(&media, kind),
        payload: media,
    }
}

/// Information card posted once a search match is chosen.
pub fn media_card(media: &MediaSummary, kind: MediaKind, requested_by: &str) -> PageBody {
    media_body(media, kind).field("Requested by", requested_by, true)
}
