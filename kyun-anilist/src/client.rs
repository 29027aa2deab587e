use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::model::{ListMedia, MediaKind, MediaList, MediaListStatus, MediaSummary};
use crate::queries;

/// Public AniList GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://graphql.anilist.co";
/// Number of matches requested for a search.
pub const SEARCH_PAGE_SIZE: u32 = 5;
/// Favourites requested per page.
pub const FAVOURITES_PAGE_SIZE: u32 = 50;
/// Upper bound on favourites pages fetched for one user.
pub const MAX_FAVOURITES_PAGES: u32 = 40;

/// Failures talking to AniList.
#[derive(Debug, thiserror::Error)]
pub enum AniListError {
    #[error("request to AniList failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("AniList returned errors: {0}")]
    GraphQl(String),
    #[error("AniList response had no data")]
    MissingData,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    status: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

impl<T> Envelope<T> {
    fn not_found(&self) -> bool {
        self.errors.iter().any(|error| error.status == Some(404))
    }

    fn into_data(self) -> Result<T, AniListError> {
        match self.data {
            Some(data) => Ok(data),
            None if !self.errors.is_empty() => Err(AniListError::GraphQl(
                self.errors
                    .into_iter()
                    .map(|error| error.message)
                    .collect::<Vec<_>>()
                    .join("; "),
            )),
            None => Err(AniListError::MissingData),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchData {
    #[serde(rename = "Page")]
    page: SearchPage,
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    media: Vec<MediaSummary>,
}

#[derive(Debug, Deserialize)]
struct UserData {
    #[serde(rename = "User")]
    user: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
struct UserNode {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct ListCollectionData {
    #[serde(rename = "MediaListCollection")]
    collection: Option<ListCollection>,
}

#[derive(Debug, Deserialize)]
struct ListCollection {
    #[serde(default)]
    lists: Vec<MediaList>,
}

#[derive(Debug, Deserialize)]
struct FavouritesData {
    #[serde(rename = "User")]
    user: Option<FavouritesUser>,
}

#[derive(Debug, Deserialize)]
struct FavouritesUser {
    favourites: Option<Favourites>,
}

#[derive(Debug, Default, Deserialize)]
struct Favourites {
    anime: Option<FavouriteNodes>,
    manga: Option<FavouriteNodes>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    #[serde(default)]
    has_next_page: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FavouriteNodes {
    #[serde(default)]
    page_info: PageInfo,
    #[serde(default)]
    nodes: Vec<ListMedia>,
}

/// One page of favourites and whether another follows.
fn favourites_page(data: FavouritesData, kind: MediaKind) -> (Vec<ListMedia>, bool) {
    let favourites = data
        .user
        .and_then(|user| user.favourites)
        .unwrap_or_default();

    let page = match kind {
        MediaKind::Anime => favourites.anime,
        MediaKind::Manga => favourites.manga,
    };

    page.map_or_else(
        || (Vec::new(), false),
        |page| (page.nodes, page.page_info.has_next_page),
    )
}

/// Thin AniList GraphQL client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AniListClient {
    http: reqwest::Client,
    endpoint: String,
}

impl AniListClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<Envelope<T>, AniListError> {
        debug!(endpoint = %self.endpoint, "posting AniList query");
        let envelope = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?
            .json::<Envelope<T>>()
            .await?;

        Ok(envelope)
    }

    /// Best matches for `search`, at most [`SEARCH_PAGE_SIZE`].
    pub async fn search_media(
        &self,
        search: &str,
        kind: MediaKind,
    ) -> Result<Vec<MediaSummary>, AniListError> {
        let envelope: Envelope<SearchData> = self
            .post(
                queries::SEARCH_MEDIA,
                json!({ "search": search, "type": kind, "perPage": SEARCH_PAGE_SIZE }),
            )
            .await?;

        Ok(envelope.into_data()?.page.media)
    }

    /// AniList user ID for a user name, `None` when no such user exists.
    pub async fn user_id_by_name(&self, name: &str) -> Result<Option<u64>, AniListError> {
        let envelope: Envelope<UserData> = self
            .post(queries::USER_BY_NAME, json!({ "name": name }))
            .await?;

        if envelope.not_found() {
            return Ok(None);
        }

        Ok(envelope.into_data()?.user.map(|user| user.id))
    }

    /// The non-custom list of `user_id` with the given status, most recently updated first.
    pub async fn media_list(
        &self,
        user_id: u64,
        kind: MediaKind,
        status: MediaListStatus,
    ) -> Result<Option<MediaList>, AniListError> {
        let envelope: Envelope<ListCollectionData> = self
            .post(
                queries::MEDIA_LIST,
                json!({ "userId": user_id, "type": kind, "status": status }),
            )
            .await?;

        if envelope.not_found() {
            return Ok(None);
        }

        Ok(select_status_list(envelope.into_data()?))
    }

    /// Every favourite anime or manga of `user_id`, fetched page by page.
    pub async fn favourites(
        &self,
        user_id: u64,
        kind: MediaKind,
    ) -> Result<Vec<ListMedia>, AniListError> {
        let query = match kind {
            MediaKind::Anime => queries::FAVOURITE_ANIME,
            MediaKind::Manga => queries::FAVOURITE_MANGA,
        };

        let mut favourites = Vec::new();
        for page in 1..=MAX_FAVOURITES_PAGES {
            let envelope: Envelope<FavouritesData> = self
                .post(
                    query,
                    json!({ "userId": user_id, "page": page, "perPage": FAVOURITES_PAGE_SIZE }),
                )
                .await?;

            if envelope.not_found() {
                return Ok(favourites);
            }

            let (nodes, has_next_page) = favourites_page(envelope.into_data()?, kind);
            favourites.extend(nodes);

            if !has_next_page {
                return Ok(favourites);
            }
        }

        if !favourites.is_empty() {
            warn!(user_id, count = favourites.len(), "favourites truncated at page limit");
        }
        Ok(favourites)
    }
}

fn select_status_list(data: ListCollectionData) -> Option<MediaList> {
    data.collection?
        .lists
        .into_iter()
        .rfind(|list| !list.is_custom_list)
}
