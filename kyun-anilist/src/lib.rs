//! AniList GraphQL access used by the browsing commands.

/// HTTP client and response decoding.
pub mod client;
/// Domain types decoded from AniList responses.
pub mod model;
mod queries;

pub use client::{
    AniListClient, AniListError, DEFAULT_ENDPOINT, FAVOURITES_PAGE_SIZE, MAX_FAVOURITES_PAGES,
    SEARCH_PAGE_SIZE,
};
pub use model::{
    CoverImage, ListMedia, MediaKind, MediaList, MediaListEntry, MediaListStatus, MediaSummary,
    MediaTitle, UnknownAlias,
};
