use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of media a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaKind {
    Anime,
    Manga,
}

impl MediaKind {
    /// Lowercase display word (`anime`, `manga`).
    pub fn noun(self) -> &'static str {
        match self {
            Self::Anime => "anime",
            Self::Manga => "manga",
        }
    }
}

impl FromStr for MediaKind {
    type Err = UnknownAlias;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "anime" | "a" => Ok(Self::Anime),
            "manga" | "m" => Ok(Self::Manga),
            _ => Err(UnknownAlias(raw.to_owned())),
        }
    }
}

/// Status of an entry on a user's media list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaListStatus {
    Planning,
    Current,
    Completed,
    Dropped,
    Paused,
    Repeating,
}

impl MediaListStatus {
    /// Short aliases accepted from chat, grouped by status.
    pub const ALIASES: &'static [(&'static str, MediaListStatus)] = &[
        ("ptw", Self::Planning),
        ("ptr", Self::Planning),
        ("planning", Self::Planning),
        ("crt", Self::Current),
        ("current", Self::Current),
        ("watching", Self::Current),
        ("wtc", Self::Current),
        ("reading", Self::Current),
        ("comp", Self::Completed),
        ("completed", Self::Completed),
        ("drp", Self::Dropped),
        ("dropped", Self::Dropped),
        ("paused", Self::Paused),
        ("hold", Self::Paused),
        ("rewatching", Self::Repeating),
        ("rereading", Self::Repeating),
    ];

    pub fn from_alias(raw: &str) -> Option<Self> {
        let wanted = raw.to_ascii_lowercase();
        Self::ALIASES
            .iter()
            .find_map(|(alias, status)| (*alias == wanted).then_some(*status))
    }
}

impl fmt::Display for MediaListStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Planning => "Planning",
            Self::Current => "Current",
            Self::Completed => "Completed",
            Self::Dropped => "Dropped",
            Self::Paused => "Paused",
            Self::Repeating => "Repeating",
        };
        f.write_str(label)
    }
}

/// A chat alias that maps to no known value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown alias `{0}`")]
pub struct UnknownAlias(pub String);

/// Localised titles of a media entry. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MediaTitle {
    pub english: Option<String>,
    pub romaji: Option<String>,
    pub native: Option<String>,
}

impl MediaTitle {
    /// English, then romaji, then native title; a placeholder if none is set.
    pub fn preferred(&self) -> &str {
        [&self.english, &self.romaji, &self.native]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|title| !title.trim().is_empty())
            .unwrap_or("Unknown title")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CoverImage {
    pub medium: Option<String>,
}

/// A search match.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSummary {
    pub id: u64,
    #[serde(default)]
    pub title: MediaTitle,
    pub site_url: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub cover_image: Option<CoverImage>,
    pub episodes: Option<u32>,
    pub chapters: Option<u32>,
    pub status: Option<String>,
    pub format: Option<String>,
    pub average_score: Option<u32>,
}

/// Media fields carried by list entries and favourites.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMedia {
    #[serde(default)]
    pub title: MediaTitle,
    pub site_url: Option<String>,
    pub episodes: Option<u32>,
    pub chapters: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MediaListEntry {
    pub progress: Option<u32>,
    pub media: ListMedia,
}

/// One status list of a user's collection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaList {
    pub name: String,
    #[serde(default)]
    pub is_custom_list: bool,
    #[serde(default)]
    pub entries: Vec<MediaListEntry>,
}
